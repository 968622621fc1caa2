use sea_orm::entity::prelude::*;

/// `edition_id` is related to `related_edition_id` (a publication related to a policy)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "edition_relations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub edition_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub related_edition_id: i32,
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
    #[sea_orm(
        belongs_to = "super::edition::Entity",
        from = "Column::RelatedEditionId",
        to = "super::edition::Column::Id",
        on_delete = "Cascade"
    )]
    RelatedEdition,
}

impl ActiveModelBehavior for ActiveModel {}
