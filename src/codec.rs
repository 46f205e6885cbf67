//! Codec
//!
//! Converts between the in-memory mapping and the bytes of the data file.
//!
//! ## File Format
//! A single JSON object. Every key and every value is base64url-encoded
//! independently, so arbitrary bytes (NUL, invalid UTF-8, quotes, braces)
//! survive the textual format.
//!
//! ```text
//! {"aGVsbG8=":"d29ybGQ=","aw==":""}
//!   └─ "hello" → "world"  └─ "k" → ""
//! ```
//!
//! The encoder emits padded tokens. The decoder accepts padded and
//! unpadded tokens.

use std::collections::{BTreeMap, HashMap};

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::error::{KvError, Result};
use crate::Mapping;

/// URL-safe alphabet, padded on encode, padding-indifferent on decode
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode one key or value
pub fn encode_token(raw: &[u8]) -> String {
    TOKEN_ENGINE.encode(raw)
}

/// Decode one key or value
pub fn decode_token(token: &str) -> Result<Vec<u8>> {
    TOKEN_ENGINE
        .decode(token)
        .map_err(|source| KvError::Decoding {
            token: token.to_string(),
            source,
        })
}

/// Serialize a mapping to the data file format
///
/// Entries are written in token order so equal mappings produce equal bytes.
pub fn encode(mapping: &Mapping) -> Result<Vec<u8>> {
    let record: BTreeMap<String, String> = mapping
        .iter()
        .map(|(key, value)| (encode_token(key), encode_token(value)))
        .collect();

    serde_json::to_vec(&record).map_err(KvError::Encoding)
}

/// Parse the data file format back into a mapping
///
/// A `null` document is read as the empty mapping.
pub fn decode(bytes: &[u8]) -> Result<Mapping> {
    let record: Option<HashMap<String, String>> =
        serde_json::from_slice(bytes).map_err(KvError::Parse)?;

    let record = record.unwrap_or_default();
    let mut mapping = Mapping::with_capacity(record.len());

    for (key, value) in record {
        let key = decode_token(&key)?;
        let value = decode_token(&value)?;
        mapping.insert(key, value);
    }

    Ok(mapping)
}
