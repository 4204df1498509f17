use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error as ThisError;

use crate::api::models::ApiResponse;
use crate::upstream::UpstreamError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// A platform-injected header the endpoint depends on was absent
    #[error("Missing required header {name}")]
    MissingHeader { name: &'static str },

    /// A header was present but unreadable (e.g. not valid UTF-8)
    #[error("Invalid value for header {name}")]
    InvalidHeader { name: &'static str },

    /// An outbound call to one of the upstream services failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingHeader { .. } | Error::InvalidHeader { .. } => StatusCode::BAD_REQUEST,
            Error::Upstream(_) => StatusCode::BAD_GATEWAY,
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::MissingHeader { name } => format!("Missing required header {name}"),
            Error::InvalidHeader { name } => format!("Invalid value for header {name}"),
            Error::Upstream(_) => "Upstream service error".to_string(),
            Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Upstream(_) | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::MissingHeader { .. } | Error::InvalidHeader { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();
        // Even error responses keep the platform envelope shape
        let body = ApiResponse::error(i32::from(status.as_u16()), self.user_message());
        (status, Json(body)).into_response()
    }
}

/// Type alias for handler results
pub type Result<T> = std::result::Result<T, Error>;
