//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — the host executes the actual I/O through the
//! `Transport` trait. This separation keeps the cache and orchestrator
//! deterministic and easy to test: unit tests script a fake transport,
//! integration tests plug in a real HTTP agent.
//!
//! All fields use owned types (`String`, `Vec`) so values can be handed
//! across any host boundary without lifetime concerns.

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by `ItemClient::build_*` methods. The host is responsible for
/// executing this request against the network and returning the
/// corresponding `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the host after executing an `HttpRequest`, then passed to
/// `ItemClient::parse_*` methods for envelope unwrapping.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// The request never produced a response (connection refused, DNS failure,
/// broken pipe). Distinct from an HTTP error status, which always arrives as
/// a regular `HttpResponse`.
#[derive(Debug, Clone)]
pub struct TransportError(pub String);

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TransportError {}

/// Executes HTTP round-trips on behalf of the core.
///
/// Implementations must return `Ok` for every received response, including
/// 4xx/5xx — status interpretation belongs to the client's `parse_*`
/// methods. `Err` means no response was received at all.
pub trait Transport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
