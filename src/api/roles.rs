use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::domain::{DomainError, RoleForm};
use crate::infrastructure::AppState;
use crate::services::DestroyOutcome;
use crate::services::role_service::{self, DESTROY_REFUSED};

use super::error::{ApiResult, Flash, invalid_form};

const INDEX: &str = "/admin/roles";

#[utoipa::path(
    get,
    path = "/api/admin/roles",
    responses((status = 200, description = "Roles ordered by organisation, kind and name"))
)]
pub async fn index(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let roles = role_service::list_roles(state.role_repo.as_ref()).await?;
    Ok(Json(json!({ "roles": roles })))
}

#[utoipa::path(
    get,
    path = "/api/admin/roles/new",
    responses((status = 200, description = "Blank role form with option lists"))
)]
pub async fn new(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let options = role_service::form_options(state.role_repo.as_ref()).await?;
    Ok(Json(json!({ "role": RoleForm::default(), "options": options })))
}

async fn rerender(state: &AppState, errors: Vec<String>, form: &RoleForm) -> ApiResult<Response> {
    let options = role_service::form_options(state.role_repo.as_ref()).await?;
    Ok(invalid_form(errors, json!({ "role": form, "options": options })))
}

#[utoipa::path(
    post,
    path = "/api/admin/roles",
    responses(
        (status = 200, description = "Role created"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create(State(state): State<AppState>, Json(form): Json<RoleForm>) -> ApiResult<Response> {
    match role_service::create_role(state.role_repo.as_ref(), &form).await {
        Ok(role) => Ok(Flash::notice(INDEX, format!("\"{}\" created.", role.name)).into_response()),
        Err(DomainError::Validation(errors)) => rerender(&state, errors, &form).await,
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get,
    path = "/api/admin/roles/{id}/edit",
    params(("id" = i32, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role with option lists"),
        (status = 404, description = "Role not found")
    )
)]
pub async fn edit(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Json<Value>> {
    let role = role_service::get_role(state.role_repo.as_ref(), id).await?;
    let options = role_service::form_options(state.role_repo.as_ref()).await?;
    Ok(Json(json!({ "role": role, "options": options })))
}

#[utoipa::path(
    put,
    path = "/api/admin/roles/{id}",
    params(("id" = i32, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role updated"),
        (status = 404, description = "Role not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<RoleForm>,
) -> ApiResult<Response> {
    match role_service::update_role(state.role_repo.as_ref(), id, &form).await {
        Ok(role) => Ok(Flash::notice(INDEX, format!("\"{}\" updated.", role.name)).into_response()),
        Err(DomainError::Validation(errors)) => rerender(&state, errors, &form).await,
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/admin/roles/{id}",
    params(("id" = i32, Path, description = "Role id")),
    responses(
        (status = 200, description = "Notice when destroyed, alert when the role is still in use"),
        (status = 404, description = "Role not found")
    )
)]
pub async fn destroy(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Flash> {
    let flash = match role_service::destroy_role(state.role_repo.as_ref(), id).await? {
        DestroyOutcome::Destroyed { name } => Flash::notice(INDEX, format!("\"{name}\" destroyed.")),
        DestroyOutcome::Refused { .. } => Flash::alert(INDEX, DESTROY_REFUSED),
    };
    Ok(flash)
}
