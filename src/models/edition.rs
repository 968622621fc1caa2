use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "editions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub body: String,
    /// See `domain::DocumentType`
    pub document_type: String,
    /// See `domain::EditionState`
    pub state: String,
    pub publication_type: Option<String>,
    pub old_url: Option<String>,
    pub first_published_at: Option<String>,
    pub published_at: Option<String>,
    pub alternative_format_provider_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attachment::Entity")]
    Attachment,
    #[sea_orm(has_many = "super::edition_audit_entry::Entity")]
    AuditEntry,
    #[sea_orm(has_many = "super::fact_check_request::Entity")]
    FactCheckRequest,
}

impl Related<super::attachment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attachment.def()
    }
}

impl Related<super::edition_audit_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuditEntry.def()
    }
}

impl Related<super::fact_check_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FactCheckRequest.def()
    }
}

impl Related<super::topic::Entity> for Entity {
    fn to() -> RelationDef {
        super::topic_membership::Relation::Topic.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::topic_membership::Relation::Edition.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
