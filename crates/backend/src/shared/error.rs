use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::domain::common::FieldError;
use serde_json::json;
use thiserror::Error;

/// Ошибки HTTP-границы.
///
/// Сбои персистентности наружу уходят как generic 500; детали остаются
/// в логах. Ошибки каналов уведомлений сюда не попадают вовсе — они
/// логируются на месте и никогда не доходят до вызывающего.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed on `{field}`: {message}")]
    Validation { field: String, message: String },

    #[error("{resource} already exists")]
    Duplicate { resource: &'static str },

    #[error("not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<FieldError> for AppError {
    fn from(e: FieldError) -> Self {
        AppError::Validation {
            field: e.field.to_string(),
            message: e.message,
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Duplicate { .. } => StatusCode::CONFLICT,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Validation { field, message } => json!({
                "error": "validation_failed",
                "field": field,
                "message": message,
            }),
            AppError::Duplicate { resource } => json!({
                "error": "duplicate",
                "resource": resource,
            }),
            AppError::NotFound => json!({ "error": "not_found" }),
            AppError::BadRequest(message) => json!({
                "error": "bad_request",
                "message": message,
            }),
            AppError::Internal(e) => {
                tracing::error!("internal error: {e:#}");
                json!({ "error": "internal" })
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let validation = AppError::Validation {
            field: "email".into(),
            message: "valid email is required".into(),
        };
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let duplicate = AppError::Duplicate {
            resource: "subscription",
        };
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);

        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("db down")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_field_error_converts_to_validation() {
        let err: AppError = FieldError::new("slug", "must not be empty").into();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field, "slug"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
