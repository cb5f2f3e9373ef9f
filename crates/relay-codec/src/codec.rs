//! Codec for encoding and decoding message payloads.
//!
//! This module provides JSON-based serialization for the values that cross
//! a pub/sub channel. Encoding always quotes and escapes content, so the
//! payload survives transport over a byte-string channel unchanged.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Codec errors that can occur during encoding/decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The value cannot be represented as JSON text.
    #[error("encoding error: {0}")]
    Encode(#[source] serde_json::Error),

    /// The payload is not valid JSON text.
    #[error("decoding error: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Encode a value to its wire text form.
///
/// A bare string encodes as a quoted JSON scalar: `Hello` becomes
/// `"Hello"`, with the quote characters part of the payload. This is what
/// keeps the contract symmetric — the decoder never has to guess whether a
/// payload was a string or structured data.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if the value has no JSON representation
/// (for example a map with non-string keys).
pub fn encode<T>(value: &T) -> Result<String, CodecError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value).map_err(CodecError::Encode)
}

/// Decode wire text back into a value.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] if the payload is not valid JSON text.
/// Malformed payloads never produce a corrupted value.
pub fn decode(payload: &str) -> Result<Value, CodecError> {
    serde_json::from_str(payload).map_err(CodecError::Decode)
}
