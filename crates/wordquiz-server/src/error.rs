use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use wordquiz_core::QuizError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: &'static str,
}

/// An error rendered as a JSON response.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        let message = err.to_string();
        match err {
            QuizError::NotFound(_) => Self::not_found(message),
            QuizError::GenerationFailed(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "GENERATION_FAILED", message)
            }
            QuizError::NoActiveSession(_) => {
                Self::new(StatusCode::BAD_REQUEST, "NO_ACTIVE_SESSION", message)
            }
            QuizError::SessionExhausted => {
                Self::new(StatusCode::BAD_REQUEST, "SESSION_EXHAUSTED", message)
            }
            QuizError::WrongMode => Self::new(StatusCode::BAD_REQUEST, "WRONG_MODE", message),
            QuizError::InvalidMode(_) => {
                Self::new(StatusCode::BAD_REQUEST, "INVALID_MODE", message)
            }
            QuizError::Storage(source) => {
                tracing::error!(error = %source, "storage failure");
                Self::internal("internal server error")
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), "INVALID_REQUEST", rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), "INVALID_REQUEST", rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_errors_map_to_statuses() {
        let cases = [
            (QuizError::NotFound("aki".into()), StatusCode::NOT_FOUND),
            (
                QuizError::GenerationFailed("empty".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                QuizError::NoActiveSession("aki".into()),
                StatusCode::BAD_REQUEST,
            ),
            (QuizError::SessionExhausted, StatusCode::BAD_REQUEST),
            (QuizError::WrongMode, StatusCode::BAD_REQUEST),
            (QuizError::InvalidMode("exam".into()), StatusCode::BAD_REQUEST),
            (
                QuizError::Storage(anyhow::anyhow!("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn storage_details_are_not_leaked() {
        let err = AppError::from(QuizError::Storage(anyhow::anyhow!("secret path")));
        assert!(!err.message.contains("secret"));
    }
}
