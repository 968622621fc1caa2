use axum::{
    Json,
    extract::{Multipart, Query, State},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::uploader::{ImportOptions, ImportReport, import_publications};

use super::error::{ApiError, ApiResult};

#[derive(Debug, Default, Deserialize)]
pub struct ImportQuery {
    #[serde(default)]
    pub dry_run: bool,
    pub default_organisation: Option<String>,
    pub creator: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/admin/imports/publications",
    params(
        ("dry_run" = Option<bool>, Query, description = "Validate rows without saving"),
        ("default_organisation" = Option<String>, Query, description = "Organisation for rows without one")
    ),
    responses(
        (status = 200, description = "Import report with per-line messages"),
        (status = 400, description = "No file uploaded"),
        (status = 422, description = "Headings rejected")
    )
)]
pub async fn import_publications_csv(
    State(db): State<DatabaseConnection>,
    Query(query): Query<ImportQuery>,
    mut multipart: Multipart,
) -> ApiResult<Json<ImportReport>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        tracing::info!(file = ?file_name, bytes = data.len(), dry_run = query.dry_run, "Publication import requested");

        let options = ImportOptions {
            default_organisation: query.default_organisation.clone(),
            dry_run: query.dry_run,
            creator: query.creator.clone(),
        };
        let report = import_publications(&db, &data, &options).await?;
        return Ok(Json(report));
    }

    Err(ApiError::BadRequest("No file uploaded".to_string()))
}
