use std::io;
use std::net::SocketAddr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use esi_config::ConfigError;
use esi_core::responses::ContactRejected;
use esi_service::SubmitError;
use thiserror::Error;

/// Body text of every `500` response. Details stay in the server log.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Startup and listener failures.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid listen address: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server stopped unexpectedly: {0}")]
    Serve(#[source] io::Error),
}

/// A failed API request, rendered as an `{"ok":false,...}` body.
#[derive(Debug)]
pub enum ApiError {
    InvalidBody(JsonRejection),
    Submit(SubmitError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection)
    }
}

impl From<SubmitError> for ApiError {
    fn from(error: SubmitError) -> Self {
        Self::Submit(error)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            Self::InvalidBody(_) | Self::Submit(SubmitError::Validation(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Submit(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ContactRejected {
        match self {
            Self::InvalidBody(rejection) => {
                ContactRejected::new(format!("Invalid request body: {}", rejection.body_text()))
            }
            Self::Submit(SubmitError::Validation(error)) => ContactRejected::from(error),
            Self::Submit(_) => ContactRejected::new(SERVER_ERROR_MESSAGE),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
