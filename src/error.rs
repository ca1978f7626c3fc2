use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::github::HostError;

/// Errors that reach an HTTP caller. Every variant renders as `{"message": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid search query")]
    InvalidQuery,

    #[error("Invalid request body")]
    InvalidBody,

    #[error("GitHub API rate limit exceeded")]
    RateLimited,

    #[error("GitHub API error")]
    Upstream { status: StatusCode },

    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidQuery | ApiError::InvalidBody => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::FORBIDDEN,
            ApiError::Upstream { status } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a failed search call onto what the caller sees.
    pub fn from_search_host(err: &HostError) -> Self {
        if matches!(err, HostError::RateLimited(_)) {
            return ApiError::RateLimited;
        }
        match err.status().and_then(|s| StatusCode::from_u16(s).ok()) {
            Some(StatusCode::FORBIDDEN) => ApiError::RateLimited,
            Some(status) if status.is_client_error() || status.is_server_error() => {
                ApiError::Upstream { status }
            }
            _ => ApiError::Internal("Failed to search GitHub"),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
