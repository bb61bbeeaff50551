use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::todo_service::TodoError;

/// Error envelope for the REST surface: `{"error": "..."}` plus a status code.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, error: message.into() }
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::NotFound(_) => {
                Self { status: StatusCode::NOT_FOUND, error: err.to_string() }
            }
            TodoError::Validation(_) => {
                Self { status: StatusCode::BAD_REQUEST, error: err.to_string() }
            }
            TodoError::Storage(source) => {
                tracing::error!(error = %source, "storage failure");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: "internal server error".into(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, axum::Json(self)).into_response()
    }
}
