use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attachments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub edition_id: i32,
    /// `file` or `html`
    pub kind: String,
    pub title: String,
    pub url: Option<String>,
    pub body: Option<String>,
    pub ordering: i32,
    pub order_url: Option<String>,
    pub isbn: Option<String>,
    pub unique_reference: Option<String>,
    pub command_paper_number: Option<String>,
    pub price: Option<String>,
    pub hoc_paper_number: Option<String>,
    pub parliamentary_session: Option<String>,
    pub unnumbered_hoc_paper: bool,
    pub unnumbered_command_paper: bool,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::edition::Entity",
        from = "Column::EditionId",
        to = "super::edition::Column::Id",
        on_delete = "Cascade"
    )]
    Edition,
}

impl Related<super::edition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Edition.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
