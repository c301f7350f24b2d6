//! Error types and response codes for the chat API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use message_log::LogError;
use serde::Serialize;
use thiserror::Error;

/// Machine-readable outcome carried in every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseCode {
    Success,
    InvalidApiKey,
    MissingRequiredParameters,
    UserNotFound,
    MessageNotFound,
    BadRequest,
    InternalServerError,
}

/// Error envelope: `{ "code": ..., "message": ... }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ResponseCode,
    pub message: String,
}

/// Errors that can occur while serving a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or mismatched `x-api-key` header.
    #[error("invalid API key")]
    Unauthorized,

    /// The request body could not be decoded.
    #[error("invalid request body: {0}")]
    BadRequest(String),

    /// A message log operation failed.
    #[error(transparent)]
    Log(#[from] LogError),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, ResponseCode, &'static str) {
        match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, ResponseCode::InvalidApiKey, "Invalid API key"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, ResponseCode::BadRequest, "Invalid request body"),
            ApiError::Log(LogError::InvalidArgument(_)) => (
                StatusCode::BAD_REQUEST,
                ResponseCode::MissingRequiredParameters,
                "Few required parameters are missing",
            ),
            ApiError::Log(LogError::UserNotFound(_)) => {
                (StatusCode::NOT_FOUND, ResponseCode::UserNotFound, "User not found")
            }
            ApiError::Log(LogError::MessageNotFound { .. }) => {
                (StatusCode::FORBIDDEN, ResponseCode::MessageNotFound, "Message not found")
            }
            ApiError::Log(LogError::StorageUnavailable(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ResponseCode::InternalServerError,
                "Internal Server Error",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!(status = status.as_u16(), "Request rejected: {}", self);
        }

        let body = ErrorBody {
            code,
            message: message.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_serialization() {
        let json = serde_json::to_string(&ResponseCode::MissingRequiredParameters).unwrap();
        assert_eq!(json, "\"MISSING_REQUIRED_PARAMETERS\"");
        let json = serde_json::to_string(&ResponseCode::InvalidApiKey).unwrap();
        assert_eq!(json, "\"INVALID_API_KEY\"");
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
            (ApiError::BadRequest("eof".into()), StatusCode::BAD_REQUEST),
            (LogError::InvalidArgument("text").into(), StatusCode::BAD_REQUEST),
            (LogError::UserNotFound("u".into()).into(), StatusCode::NOT_FOUND),
            (
                LogError::MessageNotFound {
                    user_id: "u".into(),
                    message_id: "m".into(),
                }
                .into(),
                StatusCode::FORBIDDEN,
            ),
            (
                LogError::StorageUnavailable("down".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
