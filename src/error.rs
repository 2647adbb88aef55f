//! HTTP error type shared by page and todo handlers

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid form data: {0}")]
    InvalidForm(&'static str),

    #[error("todo not found: {0}")]
    NotFound(String),

    #[error("database not configured")]
    Unavailable,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("render error: {0}")]
    Render(#[from] askama::Error),
}

impl AppError {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidForm(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        // Internal details stay in the log
        let error = if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            status
                .canonical_reason()
                .unwrap_or("internal error")
                .to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status() {
        assert_eq!(
            AppError::InvalidForm("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("abc".into()).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Unavailable.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::NotFound("abc".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
