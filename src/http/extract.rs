//! Key extractor for `/key/:key` routes

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use percent_encoding::percent_decode_str;

/// Percent-decoded last path segment, as raw bytes
///
/// Unlike `Path<String>` this accepts segments that do not decode to UTF-8
/// (`/key/%FF`), since store keys are arbitrary bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKey(pub Vec<u8>);

impl RawKey {
    fn from_path(path: &str) -> Self {
        let segment = path.rsplit('/').next().unwrap_or_default();
        RawKey(percent_decode_str(segment).collect())
    }
}

/// Axum extractor implementation
#[axum::async_trait]
impl<S> FromRequestParts<S> for RawKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RawKey::from_path(parts.uri.path()))
    }
}
