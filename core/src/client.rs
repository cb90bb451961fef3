//! Stateless HTTP request builder and envelope parser for the item API.
//!
//! # Design
//! `ItemClient` holds only a normalized `base_url` and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`, unwraps the response envelope, and classifies failures.
//! The host executes the actual HTTP round-trip, keeping this module
//! deterministic and free of I/O dependencies.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Envelope, FieldErrors, Item, ItemInput, ItemsSnapshot};

/// Synchronous, stateless client for the item API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The host is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct ItemClient {
    base_url: String,
}

impl ItemClient {
    /// Normalizes the base URL once: trailing slashes and a trailing `/api`
    /// suffix are stripped here so no per-call path logic has to care.
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim_end_matches('/');
        let trimmed = trimmed.strip_suffix("/api").unwrap_or(trimmed);
        Self {
            base_url: trimmed.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_items(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/api/items", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_item(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/api/items/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_search_items(&self, query: &str) -> HttpRequest {
        let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC);
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/api/items/search?q={encoded}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_item(&self, input: &ItemInput) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/items", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_update_item(&self, id: i64, input: &ItemInput) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/api/items/{id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_item(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/api/items/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The collection travels with the envelope's server timestamp so the
    /// cache can record when the server produced it. A success envelope with
    /// `data: null` counts as an empty list.
    pub fn parse_list_items(&self, response: HttpResponse) -> Result<ItemsSnapshot, ApiError> {
        let env: Envelope<Vec<Item>> = unwrap_envelope(response, 200)?;
        Ok(ItemsSnapshot {
            items: env.data.unwrap_or_default(),
            fetched_at: env.timestamp,
        })
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        let env: Envelope<Item> = unwrap_envelope(response, 200)?;
        require_data(env)
    }

    pub fn parse_search_items(&self, response: HttpResponse) -> Result<Vec<Item>, ApiError> {
        let env: Envelope<Vec<Item>> = unwrap_envelope(response, 200)?;
        Ok(env.data.unwrap_or_default())
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        let env: Envelope<Item> = unwrap_envelope(response, 201)?;
        require_data(env)
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        let env: Envelope<Item> = unwrap_envelope(response, 200)?;
        require_data(env)
    }

    /// Delete replies 200 with a null-data envelope rather than 204.
    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        let _env: Envelope<()> = unwrap_envelope(response, 200)?;
        Ok(())
    }
}

/// Check the status, parse the envelope, and reject `success: false` bodies.
fn unwrap_envelope<T: DeserializeOwned>(
    response: HttpResponse,
    expected: u16,
) -> Result<Envelope<T>, ApiError> {
    if response.status != expected {
        return Err(classify_failure(&response));
    }
    let env: Envelope<T> = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::Deserialization(e.to_string()))?;
    if !env.success {
        return Err(ApiError::Application {
            status: response.status,
            message: env.message,
        });
    }
    Ok(env)
}

fn require_data<T>(env: Envelope<T>) -> Result<T, ApiError> {
    env.data
        .ok_or_else(|| ApiError::Deserialization("envelope carried no data".to_string()))
}

/// Turn a non-expected-status response into the right `ApiError` variant.
///
/// Failure bodies are expected in envelope shape; when `data` holds a
/// field → message map the failure is a validation rejection. A body that
/// is not envelope-shaped degrades to `Application` with an empty message,
/// which the display helpers replace with a status-derived string.
fn classify_failure(response: &HttpResponse) -> ApiError {
    match serde_json::from_str::<Envelope<serde_json::Value>>(&response.body) {
        Ok(env) => {
            if let Some(fields) = env.data.as_ref().and_then(as_field_errors) {
                if !fields.is_empty() {
                    return ApiError::Validation {
                        status: response.status,
                        message: env.message,
                        fields,
                    };
                }
            }
            ApiError::Application {
                status: response.status,
                message: env.message,
            }
        }
        Err(_) => ApiError::Application {
            status: response.status,
            message: String::new(),
        },
    }
}

fn as_field_errors(value: &serde_json::Value) -> Option<FieldErrors> {
    let obj = value.as_object()?;
    let mut fields = FieldErrors::new();
    for (key, val) in obj {
        fields.insert(key.clone(), val.as_str()?.to_string());
    }
    Some(fields)
}
