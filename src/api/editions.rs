use axum::{
    Json,
    extract::{Path, Query, State},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::services::sidebar;

use super::error::ApiResult;

#[derive(Debug, Default, Deserialize)]
pub struct TabsQuery {
    #[serde(default)]
    pub editing: bool,
}

#[utoipa::path(
    get,
    path = "/api/admin/editions/{id}/tabs",
    params(
        ("id" = i32, Path, description = "Edition id"),
        ("editing" = Option<bool>, Query, description = "Whether the edition form is open")
    ),
    responses(
        (status = 200, description = "Sidebar tabs, first one active"),
        (status = 404, description = "Edition not found")
    )
)]
pub async fn tabs(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Query(query): Query<TabsQuery>,
) -> ApiResult<Json<Value>> {
    let tabs = sidebar::edition_sidebar(&db, id, query.editing).await?;
    Ok(Json(json!({ "tabs": tabs })))
}

pub async fn formatting_sidebar() -> Json<Value> {
    Json(json!({ "tabs": sidebar::simple_formatting_sidebar() }))
}
