use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use crate::domain::DomainError;
use crate::services::DestroyOutcome;
use crate::services::topic_admin_service::{self, DESTROY_REFUSED, TopicForm};

use super::error::{ApiResult, Flash, invalid_form};

const INDEX: &str = "/admin/topics";

#[utoipa::path(
    get,
    path = "/api/admin/topics",
    responses((status = 200, description = "Topics in alphabetical order"))
)]
pub async fn index(State(db): State<DatabaseConnection>) -> ApiResult<Json<Value>> {
    let topics = topic_admin_service::list_topics(&db).await?;
    Ok(Json(json!({ "topics": topics })))
}

pub async fn new() -> Json<Value> {
    Json(json!({ "topic": TopicForm::default() }))
}

#[utoipa::path(
    post,
    path = "/api/admin/topics",
    responses(
        (status = 200, description = "Topic created"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create(
    State(db): State<DatabaseConnection>,
    Json(form): Json<TopicForm>,
) -> ApiResult<Response> {
    match topic_admin_service::create_topic(&db, &form).await {
        Ok(topic) => Ok(Flash::notice(INDEX, format!("\"{}\" created.", topic.name)).into_response()),
        Err(DomainError::Validation(errors)) => Ok(invalid_form(errors, json!({ "topic": form }))),
        Err(e) => Err(e.into()),
    }
}

pub async fn edit(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let topic = topic_admin_service::get_topic(&db, id).await?;
    Ok(Json(json!({ "topic": topic })))
}

pub async fn update(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(form): Json<TopicForm>,
) -> ApiResult<Response> {
    match topic_admin_service::update_topic(&db, id, &form).await {
        Ok(topic) => Ok(Flash::notice(INDEX, format!("\"{}\" updated.", topic.name)).into_response()),
        Err(DomainError::Validation(errors)) => Ok(invalid_form(errors, json!({ "topic": form }))),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/admin/topics/{id}",
    params(("id" = i32, Path, description = "Topic id")),
    responses(
        (status = 200, description = "Notice when destroyed, alert when documents are still tagged"),
        (status = 404, description = "Topic not found")
    )
)]
pub async fn destroy(State(db): State<DatabaseConnection>, Path(id): Path<i32>) -> ApiResult<Flash> {
    let flash = match topic_admin_service::destroy_topic(&db, id).await? {
        DestroyOutcome::Destroyed { name } => Flash::notice(INDEX, format!("\"{name}\" destroyed.")),
        DestroyOutcome::Refused { .. } => Flash::alert(INDEX, DESTROY_REFUSED),
    };
    Ok(flash)
}
