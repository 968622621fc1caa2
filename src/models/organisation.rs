use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organisations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub acronym: Option<String>,
    /// Worldwide organisations (embassies, high commissions) live in the same table
    pub worldwide: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::statistics_announcement::Entity")]
    StatisticsAnnouncement,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        super::role_organisation::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::role_organisation::Relation::Organisation.def().rev())
    }
}

impl Related<super::statistics_announcement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatisticsAnnouncement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
