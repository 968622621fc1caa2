//! HTTP mapping for domain errors, plus the flash envelope admin actions
//! answer with in place of a redirect.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::DomainError;

/// Error type returned by every handler
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, errors) = match self {
            ApiError::Domain(DomainError::NotFound(entity)) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} not found"),
                None,
            ),
            ApiError::Domain(DomainError::Validation(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                errors.join(", "),
                Some(errors),
            ),
            ApiError::Domain(DomainError::InvalidHeadings(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_HEADINGS",
                errors.join(", "),
                Some(errors),
            ),
            ApiError::Domain(DomainError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "CONFLICT", msg, None)
            }
            ApiError::Domain(err @ (DomainError::Database(_) | DomainError::Internal(_))) => {
                tracing::error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(errors) = errors {
            body["errors"] = json!(errors);
        }

        (status, Json(body)).into_response()
    }
}

/// Stand-in for a redirect carrying a flash message
#[derive(Debug, Clone, Serialize)]
pub struct Flash {
    pub redirect_to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
}

impl Flash {
    pub fn notice(redirect_to: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            redirect_to: redirect_to.into(),
            notice: Some(message.into()),
            alert: None,
        }
    }

    pub fn alert(redirect_to: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            redirect_to: redirect_to.into(),
            notice: None,
            alert: Some(message.into()),
        }
    }
}

impl IntoResponse for Flash {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Re-render of a rejected form: 422 with the messages and what was submitted
pub fn invalid_form(errors: Vec<String>, mut form: Value) -> Response {
    if let Value::Object(map) = &mut form {
        map.insert("errors".to_string(), json!(errors));
    }
    (StatusCode::UNPROCESSABLE_ENTITY, Json(form)).into_response()
}
