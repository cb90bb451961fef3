//! Domain DTOs and the response envelope for the item API.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently
//! from the mock-server crate; integration tests catch schema drift. The
//! envelope is uniform across every endpoint — only the payload type inside
//! `data` changes (collection, single record, or null).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single item returned by the API. Identifier and timestamps are
/// server-assigned; the client never fabricates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Request payload for creating or replacing an item. Callers are expected
/// to pass already-trimmed text; `Draft::trimmed` produces one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemInput {
    pub name: String,
    pub description: String,
}

/// Uniform wrapper around every API response, success or failure.
///
/// `data` is `null` for delete responses and for enveloped errors without a
/// payload, so it deserializes as `Option<T>` regardless of endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub timestamp: String,
}

/// Field name → error message, as populated by the backend's validation
/// handler. `BTreeMap` keeps iteration in key order so "show the first
/// field's message" is deterministic.
pub type FieldErrors = BTreeMap<String, String>;

/// The item collection together with the server timestamp it was fetched
/// with. This is the unit the synchronization cache stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemsSnapshot {
    pub items: Vec<Item>,
    pub fetched_at: String,
}
