use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "document_collection_editions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub document_collection_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub edition_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::document_collection::Entity",
        from = "Column::DocumentCollectionId",
        to = "super::document_collection::Column::Id",
        on_delete = "Cascade"
    )]
    DocumentCollection,
    #[sea_orm(
        belongs_to = "super::edition::Entity",
        from = "Column::EditionId",
        to = "super::edition::Column::Id",
        on_delete = "Cascade"
    )]
    Edition,
}

impl ActiveModelBehavior for ActiveModel {}
