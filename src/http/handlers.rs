//! HTTP route handlers for the server.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::Json;
use bytes::Bytes;

use super::error::ApiError;
use super::extract::RawKey;
use super::response::{HelloResponse, StatusResponse};
use crate::error::KvError;
use crate::store::Store;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

/// Handle GET /
pub async fn handle_root() -> Json<HelloResponse> {
    Json(HelloResponse::default())
}

/// Handle GET /key/:key
pub async fn handle_get(
    State(state): State<AppState>,
    RawKey(key): RawKey,
) -> Result<([(header::HeaderName, &'static str); 1], Bytes), ApiError> {
    let value = run_blocking(state.store, move |store| store.get(&key)).await?;
    let content_type = content_type_for(&value);
    Ok(([(header::CONTENT_TYPE, content_type)], Bytes::from(value)))
}

/// Handle POST /key/:key
pub async fn handle_set(
    State(state): State<AppState>,
    RawKey(key): RawKey,
    body: Bytes,
) -> Result<Json<StatusResponse>, ApiError> {
    run_blocking(state.store, move |store| store.set(&key, &body)).await?;
    Ok(Json(StatusResponse::success()))
}

/// Handle DELETE /key/:key
pub async fn handle_delete(
    State(state): State<AppState>,
    RawKey(key): RawKey,
) -> Result<Json<StatusResponse>, ApiError> {
    run_blocking(state.store, move |store| store.delete(&key)).await?;
    Ok(Json(StatusResponse::success()))
}

/// Content type for a stored value
///
/// Values are untyped bytes. Anything without binary control bytes in its
/// first 512 bytes is served as text, the rest as an octet stream.
fn content_type_for(value: &[u8]) -> &'static str {
    const SNIFF_LEN: usize = 512;

    let is_binary = value
        .iter()
        .take(SNIFF_LEN)
        .any(|&b| matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F));

    if is_binary {
        "application/octet-stream"
    } else {
        "text/plain; charset=utf-8"
    }
}

/// Run a store call on the blocking pool.
///
/// The call runs to completion even if the request future is dropped.
async fn run_blocking<T, F>(store: Arc<dyn Store>, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&dyn Store) -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|e| KvError::TaskJoin(e.to_string()))?;

    Ok(result?)
}
