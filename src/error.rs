use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    models::{MessageResponse, Validate},
    repository::RepoError,
    storage::StorageError,
};

/// AppError
///
/// The single error type returned by handlers and extractors. Every variant renders as
/// a `{ "msg": "..." }` body; server-side failures are logged and masked.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Carries the resource name, e.g. "Portfolio item".
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Repo(RepoError::Conflict(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Storage(StorageError::Rejected(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Repo(RepoError::Database(err)) => {
                tracing::error!(error = %err, "Database error");
                server_error()
            }
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Media upload failed");
                server_error()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                server_error()
            }
        }
    }
}

fn server_error() -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = self.status_and_message();
        (status, Json(MessageResponse::new(msg))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Rejects a payload with 400 and every validation message joined by "; ".
pub fn ensure_valid(payload: &impl Validate) -> AppResult<()> {
    let errors = payload.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::BadRequest(errors.join("; ")))
    }
}
