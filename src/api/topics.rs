use axum::{
    Json,
    extract::{Path, State},
};
use sea_orm::DatabaseConnection;

use crate::services::topic_service::{self, TopicIndex, TopicPage};

use super::error::ApiResult;

#[utoipa::path(
    get,
    path = "/api/topics",
    responses((status = 200, description = "Topics with published content and a featured topic"))
)]
pub async fn index(State(db): State<DatabaseConnection>) -> ApiResult<Json<TopicIndex>> {
    Ok(Json(topic_service::index(&db).await?))
}

#[utoipa::path(
    get,
    path = "/api/topics/{slug}",
    params(("slug" = String, Path, description = "Topic slug")),
    responses(
        (status = 200, description = "Topic with policies, news and recently changed documents"),
        (status = 404, description = "Topic not found")
    )
)]
pub async fn show(
    State(db): State<DatabaseConnection>,
    Path(slug): Path<String>,
) -> ApiResult<Json<TopicPage>> {
    Ok(Json(topic_service::show(&db, &slug).await?))
}
