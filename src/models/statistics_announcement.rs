use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "statistics_announcements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub organisation_id: Option<i32>,
    /// Mirror of the latest `statistics_announcement_dates.release_date`
    pub current_release_date: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organisation::Entity",
        from = "Column::OrganisationId",
        to = "super::organisation::Column::Id",
        on_delete = "SetNull"
    )]
    Organisation,
    #[sea_orm(has_many = "super::statistics_announcement_date::Entity")]
    ReleaseDate,
}

impl Related<super::organisation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organisation.def()
    }
}

impl Related<super::statistics_announcement_date::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReleaseDate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
