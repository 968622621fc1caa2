use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "statistics_announcement_dates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub statistics_announcement_id: i32,
    pub release_date: String,
    /// `exact`, `one_month` or `two_month`
    pub precision: String,
    pub confirmed: bool,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::statistics_announcement::Entity",
        from = "Column::StatisticsAnnouncementId",
        to = "super::statistics_announcement::Column::Id",
        on_delete = "Cascade"
    )]
    StatisticsAnnouncement,
}

impl Related<super::statistics_announcement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatisticsAnnouncement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
