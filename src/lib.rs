//! # diskkv
//!
//! A minimal key-value store with:
//! - One JSON data file per storage directory, rewritten on every mutation
//! - Binary-safe keys and values (base64url inside the JSON)
//! - A single lock serializing each load-mutate-save cycle
//! - REST-style HTTP access
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     HTTP Router (axum)                      │
//! │            GET / POST / DELETE  /key/{key}                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ spawn_blocking
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Store (trait)                          │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │    FileStore    │                │   MemoryStore   │
//!   │ (Mutex, reload) │                │    (RwLock)     │
//!   └────────┬────────┘                └─────────────────┘
//!            │
//!            ▼
//!   ┌─────────────────┐
//!   │      Codec      │
//!   │ JSON + base64url│
//!   └────────┬────────┘
//!            ▼
//!     {storage_dir}/data.json
//! ```

use std::collections::HashMap;

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod store;
pub mod http;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{KvError, Result};
pub use config::{Backend, Config};
pub use store::{FileStore, MemoryStore, Store};

/// The key-value mapping held by a store
pub type Mapping = HashMap<Vec<u8>, Vec<u8>>;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of diskkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
