//! HTTP Module
//!
//! Thin REST façade over a [`Store`](crate::store::Store).
//!
//! ## Routes
//! - `GET    /`          → `{"hello":"world"}`
//! - `GET    /key/:key`  → raw value bytes (empty if absent), text/plain
//!   unless the value looks binary
//! - `POST   /key/:key`  → store request body, `{"status":"success"}`
//! - `DELETE /key/:key`  → `{"status":"success"}`
//!
//! `:key` is the percent-decoded path segment and may be any bytes.
//!
//! Any store failure renders as `500 {"error": "<message>"}`.

mod error;
mod extract;
mod handlers;
mod response;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::store::Store;

pub use error::ApiError;
pub use extract::RawKey;
pub use handlers::AppState;
pub use response::StatusResponse;

/// Build the application router
pub fn build_router(store: Arc<dyn Store>) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/", get(handlers::handle_root))
        .route(
            "/key/:key",
            get(handlers::handle_get)
                .post(handlers::handle_set)
                .delete(handlers::handle_delete),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
