use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Editor-facing type (`minister`, `board_member`, ...)
    pub role_type: String,
    /// Persisted role class derived from `role_type` (`MinisterialRole`, ...)
    pub kind: String,
    pub permanent_secretary: bool,
    pub cabinet_member: bool,
    pub whip_organisation_id: Option<i32>,
    pub role_payment_type_id: Option<i32>,
    pub attends_cabinet_type_id: Option<i32>,
    pub responsibilities: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::role_appointment::Entity")]
    RoleAppointment,
}

impl Related<super::role_appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoleAppointment.def()
    }
}

impl Related<super::organisation::Entity> for Entity {
    fn to() -> RelationDef {
        super::role_organisation::Relation::Organisation.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::role_organisation::Relation::Role.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
