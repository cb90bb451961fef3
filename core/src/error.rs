//! Error taxonomy for the item API client.
//!
//! # Design
//! `Validation` gets a dedicated variant because create failures branch on
//! the field map, and `Application` keeps the raw status plus the server
//! message for debugging. `Transport` means no response was received at all.
//! The display helpers at the bottom implement the message fallback chains
//! the UI renders inline; the error values themselves stay structured.

use thiserror::Error;

use crate::http::TransportError;
use crate::types::FieldErrors;

/// Errors surfaced by `ItemClient` parse methods and the orchestrator.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never got a response (network/DNS failure).
    #[error("transport failure: {0}")]
    Transport(String),

    /// A mutation kind was submitted while its previous submission was
    /// still in flight. Each kind serializes against itself; no request is
    /// issued for the rejected submission.
    #[error("a {0} is already pending")]
    AlreadyPending(&'static str),

    /// A response arrived with failure semantics: non-2xx status, or a 2xx
    /// body whose envelope reports `success: false`.
    #[error("HTTP {status}: {message}")]
    Application { status: u16, message: String },

    /// An application failure carrying a field → message validation map.
    #[error("validation failed: {message}")]
    Validation {
        status: u16,
        message: String,
        fields: FieldErrors,
    },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Transport(err.0)
    }
}

/// Message shown when a list read fails: prefer the server-supplied message,
/// fall back to an HTTP-status-derived one, then to the transport message,
/// then to a generic string.
pub fn load_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Application { status, message }
        | ApiError::Validation {
            status, message, ..
        } => {
            if message.is_empty() {
                format!("Failed to load items (HTTP {status})")
            } else {
                message.clone()
            }
        }
        ApiError::Transport(msg) if !msg.is_empty() => msg.clone(),
        _ => "Error loading items".to_string(),
    }
}

/// Message shown when a create fails: first validation-map entry (key
/// order), then the server message, then the raw error message, then a
/// generic fallback.
pub fn create_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Validation {
            message, fields, ..
        } => fields
            .values()
            .next()
            .cloned()
            .filter(|m| !m.is_empty())
            .or_else(|| (!message.is_empty()).then(|| message.clone()))
            .unwrap_or_else(|| "Failed to create item".to_string()),
        ApiError::Application { message, .. } if !message.is_empty() => message.clone(),
        ApiError::Transport(msg) | ApiError::Serialization(msg) | ApiError::Deserialization(msg)
            if !msg.is_empty() =>
        {
            msg.clone()
        }
        _ => "Failed to create item".to_string(),
    }
}
