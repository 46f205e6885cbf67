//! HTTP response types for the server.

use serde::Serialize;

/// Envelope returned by mutating requests.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Always `"success"`; failures use the error envelope instead.
    pub status: String,
}

impl StatusResponse {
    /// Create a successful status response.
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub hello: String,
}

impl Default for HelloResponse {
    fn default() -> Self {
        Self {
            hello: "world".to_string(),
        }
    }
}
