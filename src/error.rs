//! Error type shared by the search and download operations, and its HTTP
//! rendering.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::models::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required field was missing or blank.
    #[error("{0}")]
    InvalidInput(String),

    /// Talking to the upstream site failed. `message` is what the client
    /// sees; `cause` is only logged.
    #[error("{message}")]
    Upstream {
        message: String,
        cause: anyhow::Error,
    },
}

impl AppError {
    pub fn upstream(message: impl Into<String>, cause: impl Into<anyhow::Error>) -> AppError {
        AppError::Upstream {
            message: message.into(),
            cause: cause.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::InvalidInput(msg) => {
                tracing::debug!(error = %msg, "rejected request");
            }
            AppError::Upstream { message, cause } => {
                tracing::error!(error = ?cause, "{message}");
            }
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
