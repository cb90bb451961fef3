//! In-memory implementation of the item REST contract.
//!
//! Mirrors the real backend's behavior closely enough for integration
//! tests: every response is wrapped in the uniform envelope, ids are
//! sequential and server-assigned, blank names are rejected with a
//! field-level validation map, and missing ids produce enveloped 404s.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
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

#[derive(Debug, Deserialize)]
pub struct ItemInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Uniform response wrapper. `data` is type-erased to `serde_json::Value`
/// so success payloads, validation maps, and nulls all share one shape.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub timestamp: String,
}

impl Envelope {
    fn success(message: &str, data: impl Serialize) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: serde_json::to_value(data).ok(),
            timestamp: now(),
        }
    }

    fn error(message: &str, data: Option<serde_json::Value>) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data,
            timestamp: now(),
        }
    }
}

fn now() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

#[derive(Debug, Default)]
pub struct Store {
    items: HashMap<i64, Item>,
    next_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/items", get(list_items).post(create_item))
        .route("/api/items/search", get(search_items))
        .route(
            "/api/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type Reply = (StatusCode, Json<Envelope>);

fn not_found(id: i64) -> Reply {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::error(&format!("Item not found with id: {id}"), None)),
    )
}

/// Blank (or whitespace-only) names are the one validation rule the real
/// backend enforces; the rejection carries a field → message map in `data`.
fn validate(input: &ItemInput) -> Option<Reply> {
    if input.name.trim().is_empty() {
        let mut fields = HashMap::new();
        fields.insert("name", "Name is required");
        return Some((
            StatusCode::BAD_REQUEST,
            Json(Envelope::error(
                "Validation failed",
                serde_json::to_value(fields).ok(),
            )),
        ));
    }
    None
}

async fn list_items(State(db): State<Db>) -> Reply {
    let store = db.read().await;
    let mut items: Vec<Item> = store.items.values().cloned().collect();
    items.sort_by_key(|item| item.id);
    (
        StatusCode::OK,
        Json(Envelope::success("Operation successful", items)),
    )
}

async fn get_item(State(db): State<Db>, Path(id): Path<i64>) -> Reply {
    let store = db.read().await;
    match store.items.get(&id) {
        Some(item) => (
            StatusCode::OK,
            Json(Envelope::success("Operation successful", item)),
        ),
        None => not_found(id),
    }
}

async fn search_items(State(db): State<Db>, Query(params): Query<SearchParams>) -> Reply {
    let needle = params.q.to_lowercase();
    let store = db.read().await;
    let mut items: Vec<Item> = store
        .items
        .values()
        .filter(|item| {
            item.name.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    items.sort_by_key(|item| item.id);
    (
        StatusCode::OK,
        Json(Envelope::success("Operation successful", items)),
    )
}

async fn create_item(State(db): State<Db>, Json(input): Json<ItemInput>) -> Reply {
    if let Some(rejection) = validate(&input) {
        return rejection;
    }
    let mut store = db.write().await;
    store.next_id += 1;
    let item = Item {
        id: store.next_id,
        name: input.name,
        description: input.description,
        created_at: now(),
        updated_at: None,
    };
    store.items.insert(item.id, item.clone());
    (
        StatusCode::CREATED,
        Json(Envelope::success("Item created successfully", item)),
    )
}

async fn update_item(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<ItemInput>,
) -> Reply {
    if let Some(rejection) = validate(&input) {
        return rejection;
    }
    let mut store = db.write().await;
    let Some(item) = store.items.get_mut(&id) else {
        return not_found(id);
    };
    item.name = input.name;
    item.description = input.description;
    item.updated_at = Some(now());
    let item = item.clone();
    (
        StatusCode::OK,
        Json(Envelope::success("Item updated successfully", item)),
    )
}

async fn delete_item(State(db): State<Db>, Path(id): Path<i64>) -> Reply {
    let mut store = db.write().await;
    match store.items.remove(&id) {
        Some(_) => (
            StatusCode::OK,
            Json(Envelope::success(
                "Item deleted successfully",
                serde_json::Value::Null,
            )),
        ),
        None => not_found(id),
    }
}
