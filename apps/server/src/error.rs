use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pitchdesk_ai::{failure_response, AiError, FailureResponse};
use pitchdesk_core::errors::{DatabaseError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
    /// Final failure of an AI fallback run, already mapped to a status.
    #[error("{}", .0.message)]
    Provider(FailureResponse),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    retry_after: Option<u64>,
}

impl ApiError {
    /// Maps an AI failure, using `default_message` when the provider gave none.
    pub fn from_ai(err: AiError, default_message: &str) -> Self {
        match err {
            AiError::NotConfigured => ApiError::Internal(err.to_string()),
            AiError::InvalidInput(msg) => ApiError::BadRequest(msg),
            AiError::Provider(provider) => {
                ApiError::Provider(failure_response(&provider, default_message))
            }
            AiError::Core(core) => ApiError::Core(core),
        }
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Validation(inner) => (StatusCode::BAD_REQUEST, inner.to_string()),
                CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
                CoreError::Database(DatabaseError::NotFound(msg)) => {
                    (StatusCode::NOT_FOUND, msg.clone())
                }
                CoreError::Database(DatabaseError::UniqueViolation(_)) => {
                    (StatusCode::CONFLICT, e.to_string())
                }
                CoreError::Database(DatabaseError::ForeignKeyViolation(_)) => {
                    (StatusCode::BAD_REQUEST, e.to_string())
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            },
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason.clone()),
            ApiError::Internal(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason.clone()),
            ApiError::Provider(failure) => (
                StatusCode::from_u16(failure.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                failure.message.clone(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, message);
        }
        let retry_after = match &self {
            ApiError::Provider(failure) => failure.retry_after,
            _ => None,
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
            retry_after,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
