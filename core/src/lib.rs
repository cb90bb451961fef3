//! Client-side data-synchronization core for the item management UI.
//!
//! # Overview
//! Builds `HttpRequest` values and parses enveloped `HttpResponse` values
//! without touching the network (host-does-IO pattern); the host supplies a
//! `Transport` that executes the round-trips. On top of the client sit the
//! synchronization cache (one snapshot, explicit invalidation), the mutation
//! orchestrator (per-kind pending/error state, invalidate-on-success), and
//! the session facade the rendering layer drives.
//!
//! # Design
//! - `ItemClient` is stateless — it holds only the normalized `base_url`.
//! - Every server reply is wrapped in a uniform envelope; mutations never
//!   patch local state, they invalidate the cache and the next read
//!   refetches.
//! - Everything is synchronous and single-threaded; correctness of "at most
//!   one item in edit mode" comes from the `EditMode` variant, not locks.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod cache;
pub mod client;
pub mod config;
pub mod drafts;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod session;
pub mod types;

pub use cache::ItemCache;
pub use client::ItemClient;
pub use drafts::{Draft, EditMode, FormState};
pub use error::{create_error_message, load_error_message, ApiError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use orchestrator::MutationOrchestrator;
pub use session::ItemSession;
pub use types::{Envelope, FieldErrors, Item, ItemInput, ItemsSnapshot};
