use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

/// Errors surfaced by the API facade and repositories. Handlers are the
/// single point that turns these into responses; nothing retries or
/// swallows them on the way up.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("Unsupported method {method} for {path}")]
    UnsupportedMethod { method: &'static str, path: String },

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("{0}")]
    ValidationFailed(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::UnknownEndpoint(_) => StatusCode::NOT_FOUND,
            Self::UnsupportedMethod { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::RequestFailed(_) => StatusCode::BAD_GATEWAY,
            Self::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("{self}");
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
