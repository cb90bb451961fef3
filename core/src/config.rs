//! Backend selection via the environment.

/// Environment variable naming the backend base URL.
pub const BASE_URL_ENV: &str = "ITEM_API_URL";

/// Loopback default used when `ITEM_API_URL` is unset or empty.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Read the backend base URL from the environment, falling back to the
/// loopback default. Normalization (trailing slash, `/api` suffix) happens
/// in `ItemClient::new`, not here.
pub fn base_url_from_env() -> String {
    base_url_or_default(std::env::var(BASE_URL_ENV).ok())
}

fn base_url_or_default(value: Option<String>) -> String {
    match value {
        Some(url) if !url.trim().is_empty() => url,
        _ => DEFAULT_BASE_URL.to_string(),
    }
}
