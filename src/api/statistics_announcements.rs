use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::domain::{DomainError, StatisticsAnnouncementForm};
use crate::infrastructure::AppState;
use crate::services::statistics_announcement_service::{
    self as announcements, FilterOptions, PRECISIONS, StatisticsAnnouncementFilter,
};

use super::error::{ApiResult, Flash, invalid_form};

const INDEX: &str = "/admin/statistics_announcements";

#[utoipa::path(
    get,
    path = "/api/admin/statistics_announcements",
    params(
        ("title" = Option<String>, Query, description = "Case-insensitive title fragment"),
        ("organisation_id" = Option<String>, Query, description = "Organisation id, blank for all"),
        ("page" = Option<String>, Query, description = "1-based page number")
    ),
    responses(
        (status = 200, description = "One page of announcements, soonest release first"),
        (status = 422, description = "Unusable filter")
    )
)]
pub async fn index(
    State(state): State<AppState>,
    Query(options): Query<FilterOptions>,
) -> ApiResult<Json<Value>> {
    let filter = StatisticsAnnouncementFilter::new(options.clone()).per_page(state.page_size);
    let page = filter
        .statistics_announcements(state.announcement_repo.as_ref())
        .await?;
    let organisations = state.announcement_repo.organisation_options().await?;
    Ok(Json(json!({
        "statistics_announcements": page.items,
        "total": page.total,
        "page": page.page,
        "per_page": page.per_page,
        "total_pages": page.total_pages,
        "filter": {
            "title": options.title,
            "organisation_id": options.organisation_id,
        },
        "organisations": organisations,
    })))
}

async fn form_payload(state: &AppState, announcement: Value) -> ApiResult<Value> {
    let organisations = state.announcement_repo.organisation_options().await?;
    Ok(json!({
        "statistics_announcement": announcement,
        "organisations": organisations,
        "precisions": PRECISIONS,
    }))
}

pub async fn new(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let blank = json!(StatisticsAnnouncementForm::default());
    Ok(Json(form_payload(&state, blank).await?))
}

#[utoipa::path(
    post,
    path = "/api/admin/statistics_announcements",
    responses(
        (status = 200, description = "Announcement created"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(form): Json<StatisticsAnnouncementForm>,
) -> ApiResult<Response> {
    match announcements::create_announcement(state.announcement_repo.as_ref(), &form).await {
        Ok(created) => {
            Ok(Flash::notice(INDEX, format!("\"{}\" created.", created.title)).into_response())
        }
        Err(DomainError::Validation(errors)) => {
            Ok(invalid_form(errors, form_payload(&state, json!(form)).await?))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn edit(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Json<Value>> {
    let announcement = announcements::get_announcement(state.announcement_repo.as_ref(), id).await?;
    Ok(Json(form_payload(&state, json!(announcement)).await?))
}

#[utoipa::path(
    put,
    path = "/api/admin/statistics_announcements/{id}",
    params(("id" = i32, Path, description = "Announcement id")),
    responses(
        (status = 200, description = "Announcement updated"),
        (status = 404, description = "Announcement not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<StatisticsAnnouncementForm>,
) -> ApiResult<Response> {
    match announcements::update_announcement(state.announcement_repo.as_ref(), id, &form).await {
        Ok(updated) => {
            Ok(Flash::notice(INDEX, format!("\"{}\" updated.", updated.title)).into_response())
        }
        Err(DomainError::Validation(errors)) => {
            Ok(invalid_form(errors, form_payload(&state, json!(form)).await?))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn destroy(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Flash> {
    let title = announcements::destroy_announcement(state.announcement_repo.as_ref(), id).await?;
    Ok(Flash::notice(INDEX, format!("\"{title}\" destroyed.")))
}
