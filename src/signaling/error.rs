//! Error types for lobby and slot operations

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Failures inside the registry. The not-found kinds stay distinct here so
/// they can be logged, but share one response on the wire.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("lobby {0} not found")]
    LobbyNotFound(String),

    #[error("malformed slot index {raw:?} in lobby {lobby_id}")]
    MalformedSlot { lobby_id: String, raw: String },

    #[error("slot {index} not found in lobby {lobby_id}")]
    SlotNotFound { lobby_id: String, index: usize },

    #[error("no {kind} posted for slot {index} in lobby {lobby_id}")]
    PayloadNotSet {
        lobby_id: String,
        index: usize,
        kind: &'static str,
    },

    #[error("bad payload: {0}")]
    BadPayload(#[from] serde_json::Error),

    #[error("no free lobby id after {attempts} attempts")]
    Collision { attempts: u32 },
}

impl RegistryError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RegistryError::LobbyNotFound(_)
                | RegistryError::MalformedSlot { .. }
                | RegistryError::SlotNotFound { .. }
                | RegistryError::PayloadNotSet { .. }
        )
    }
}

/// Errors returned to HTTP clients
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("bad payload: {0}")]
    BadPayload(#[from] serde_json::Error),

    #[error("no lobby id available, try again")]
    Unavailable,
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::BadPayload(err) => ApiError::BadPayload(err),
            RegistryError::Collision { .. } => ApiError::Unavailable,
            _ => ApiError::NotFound,
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
