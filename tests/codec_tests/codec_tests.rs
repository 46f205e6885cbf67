//! Codec Tests
//!
//! Tests for mapping encoding/decoding and the on-disk token format.

use diskkv::codec::{decode, decode_token, encode, encode_token};
use diskkv::{KvError, Mapping};

// =============================================================================
// Helper Functions
// =============================================================================

fn mapping(pairs: &[(&[u8], &[u8])]) -> Mapping {
    pairs
        .iter()
        .map(|(k, v)| (k.to_vec(), v.to_vec()))
        .collect()
}

fn roundtrip(m: &Mapping) -> Mapping {
    decode(&encode(m).unwrap()).unwrap()
}

// =============================================================================
// Round-trip Tests
// =============================================================================

#[test]
fn test_roundtrip_empty_mapping() {
    let m = Mapping::new();
    assert_eq!(roundtrip(&m), m);
}

#[test]
fn test_roundtrip_single_entry() {
    let m = mapping(&[(b"hello", b"world")]);
    assert_eq!(roundtrip(&m), m);
}

#[test]
fn test_roundtrip_empty_key_and_value() {
    let m = mapping(&[(b"", b"value-for-empty-key"), (b"empty-value", b"")]);
    assert_eq!(roundtrip(&m), m);
}

#[test]
fn test_roundtrip_binary_and_metacharacters() {
    let m = mapping(&[
        (b"nul\0key", b"nul\0\0value"),
        (&[0xff, 0xfe, 0x80], &[0xc3, 0x28, 0x00, 0x7f]),
        (br#"{"quoted":"key"}"#, br#"}{\"][,:"#),
        ("ключ".as_bytes(), "значение 🚀".as_bytes()),
    ]);
    assert_eq!(roundtrip(&m), m);
}

#[test]
fn test_roundtrip_many_entries() {
    let m: Mapping = (0..500u32)
        .map(|i| (i.to_be_bytes().to_vec(), format!("value-{}", i).into_bytes()))
        .collect();
    assert_eq!(roundtrip(&m), m);
}

// =============================================================================
// Format Tests
// =============================================================================

#[test]
fn test_encode_is_json_of_tokens() {
    let m = mapping(&[(b"hello", b"world"), (b"k", b"")]);
    let encoded = encode(&m).unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&encoded).unwrap();
    assert_eq!(parsed, serde_json::json!({ "aGVsbG8=": "d29ybGQ=", "aw==": "" }));
}

#[test]
fn test_encode_is_deterministic() {
    let a = mapping(&[(b"a", b"1"), (b"b", b"2"), (b"c", b"3")]);
    let b = mapping(&[(b"c", b"3"), (b"a", b"1"), (b"b", b"2")]);

    assert_eq!(encode(&a).unwrap(), encode(&b).unwrap());
}

#[test]
fn test_tokens_use_urlsafe_alphabet() {
    // Bytes that would produce '+' and '/' in the standard alphabet
    let token = encode_token(&[0xfb, 0xef, 0xbe, 0xff]);

    assert!(!token.contains('+'));
    assert!(!token.contains('/'));
    assert!(token.contains('-') || token.contains('_'));
    assert_eq!(decode_token(&token).unwrap(), vec![0xfb, 0xef, 0xbe, 0xff]);
}

#[test]
fn test_decode_accepts_unpadded_tokens() {
    let decoded = decode(br#"{"aGVsbG8":"d29ybGQ","aw":""}"#).unwrap();

    assert_eq!(decoded, mapping(&[(b"hello", b"world"), (b"k", b"")]));
}

#[test]
fn test_decode_null_document_is_empty() {
    assert!(decode(b"null").unwrap().is_empty());
}

#[test]
fn test_decode_empty_object() {
    assert!(decode(b"{}").unwrap().is_empty());
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_decode_invalid_json_is_parse_error() {
    let result = decode(b"{not json");
    assert!(matches!(result, Err(KvError::Parse(_))));
}

#[test]
fn test_decode_empty_bytes_is_parse_error() {
    let result = decode(b"");
    assert!(matches!(result, Err(KvError::Parse(_))));
}

#[test]
fn test_decode_wrong_shape_is_parse_error() {
    assert!(matches!(decode(b"[1, 2, 3]"), Err(KvError::Parse(_))));
    assert!(matches!(decode(br#"{"aw==": 5}"#), Err(KvError::Parse(_))));
}

#[test]
fn test_decode_bad_alphabet_is_decoding_error() {
    // '+' and '/' belong to the standard alphabet, not the URL-safe one
    let result = decode(br#"{"a+/=":"aw=="}"#);

    match result {
        Err(KvError::Decoding { token, .. }) => assert_eq!(token, "a+/="),
        other => panic!("Expected decoding error, got {:?}", other),
    }
}

#[test]
fn test_decode_bad_value_length_is_decoding_error() {
    // A single symbol can never be a complete base64 quantum
    let result = decode(br#"{"aw==":"a"}"#);

    match result {
        Err(KvError::Decoding { token, .. }) => assert_eq!(token, "a"),
        other => panic!("Expected decoding error, got {:?}", other),
    }
}

#[test]
fn test_decode_corrupted_padding_is_decoding_error() {
    let result = decode(br#"{"a=w=":""}"#);
    assert!(matches!(result, Err(KvError::Decoding { .. })));
}
