//! Typed API error for HTTP handlers.
//!
//! Converts storage errors into HTTP responses whose body is always an
//! [`AppError`] rendering. Handlers return `Result<_, ApiError>`.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use rest_api_core::{AppError, CODE_DEADLINE_EXCEEDED, CODE_INVALID_ID};
use rest_api_storage::StorageError;

/// API error with HTTP status code and an application error body.
///
/// `Internal` logs the real error server-side and returns the generic
/// system error to the client. No store detail leaks.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: malformed body or identifier.
    BadRequest(AppError),
    /// 404 Not Found: always the shared instance.
    NotFound(&'static AppError),
    /// 504 Gateway Timeout: the store did not answer within the deadline.
    DeadlineExceeded,
    /// 500 Internal Server Error: unexpected failure. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::BadRequest(err) => err.render(),
            Self::NotFound(err) => err.render(),
            Self::DeadlineExceeded => AppError::from_static(
                "request timed out",
                "storage did not respond within the request deadline",
                CODE_DEADLINE_EXCEEDED,
            )
            .render(),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                AppError::internal().render()
            },
        };
        (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(app_error) => Self::NotFound(app_error),
            err @ StorageError::InvalidId { .. } => {
                let developer_message = err.to_string();
                Self::BadRequest(AppError::new(
                    Some(err),
                    "invalid user id",
                    developer_message,
                    CODE_INVALID_ID,
                ))
            },
            other => Self::Internal(other.into()),
        }
    }
}
