use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "topics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: String,
    pub featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::edition::Entity> for Entity {
    fn to() -> RelationDef {
        super::topic_membership::Relation::Edition.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::topic_membership::Relation::Topic.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
