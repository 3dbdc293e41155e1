use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use commander_core::error::CoreError;
use json_patch::PatchError;
use commander_core::validation::{self, FieldErrors};
use commander_db::repositories::RepoError;
use serde_json::json;
use validator::ValidationErrors;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`RepoError`] for persistence
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `commander_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence error from the repository layer.
    #[error(transparent)]
    Repository(#[from] RepoError),

    /// A path segment that cannot name a resource, such as a non-integer id.
    #[error("No resource at path: {0}")]
    UnknownPath(String),

    /// A well-formed request whose content cannot be applied, with
    /// per-field details when available.
    #[error("Unprocessable: {message}")]
    Unprocessable { message: String, errors: FieldErrors },

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// A 422 carrying the field-level failures of a validated candidate.
    pub fn invalid_candidate(errors: &ValidationErrors) -> Self {
        AppError::Unprocessable {
            message: "One or more validation errors occurred".to_string(),
            errors: validation::field_errors(errors),
        }
    }
}

impl From<PatchError> for AppError {
    fn from(err: PatchError) -> Self {
        AppError::Unprocessable {
            message: err.to_string(),
            errors: FieldErrors::new(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                AppError::UnknownPath(err.body_text())
            }
            other => AppError::InternalError(other.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id, "Entity not found");
                    return StatusCode::NOT_FOUND.into_response();
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Repository errors ---
            AppError::Repository(RepoError::Database(err)) => classify_sqlx_error(err),
            AppError::Repository(err @ RepoError::IdsExhausted) => {
                tracing::error!(error = %err, "Command store cannot assign ids");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::UnknownPath(detail) => {
                tracing::debug!(detail = %detail, "Path does not name a resource");
                return StatusCode::NOT_FOUND.into_response();
            }
            AppError::Unprocessable { message, errors } => {
                let mut body = json!({
                    "error": message,
                    "code": "VALIDATION_ERROR",
                });
                if !errors.is_empty() {
                    body["errors"] = json!(errors);
                }
                return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
