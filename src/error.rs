// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::{
    ai::AiError,
    quiz::QuizError,
    utils::sound::{GENERATION_FAILED, SoundEffect},
    wall::WallError,
};

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (e.g., a generation already running for this client)
    Conflict(String),

    // 502 Bad Gateway: the AI service failed; the message is user-facing and retryable,
    // and the body carries the failure sound
    ServiceUnavailable(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut signals: &[SoundEffect] = &[];
        let (status, error_message, retryable) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    false,
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, false),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, false),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, true),
            AppError::ServiceUnavailable(msg) => {
                signals = &GENERATION_FAILED;
                (StatusCode::BAD_GATEWAY, msg, true)
            }
        };
        let mut body = json!({
            "error": error_message,
            "retryable": retryable,
        });
        if !signals.is_empty() {
            body["signals"] = json!(signals);
        }

        (status, Json(body)).into_response()
    }
}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::ChoiceOutOfRange { .. } => AppError::BadRequest(err.to_string()),
            QuizError::EmptyQuestionBank => AppError::InternalServerError(err.to_string()),
        }
    }
}

/// Validation failures become 400; storage failures stay internal.
impl From<WallError> for AppError {
    fn from(err: WallError) -> Self {
        match err {
            WallError::Empty { .. } | WallError::TooLong { .. } => {
                AppError::BadRequest(err.to_string())
            }
            WallError::Encode(_) | WallError::Storage(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

/// Logs the cause and keeps only the localized message for the client.
impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        tracing::error!("AI request failed: {}", err);
        AppError::ServiceUnavailable(err.user_message().to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
