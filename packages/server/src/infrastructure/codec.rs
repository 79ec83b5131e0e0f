//! Wire codec for the line-delimited protocol.
//!
//! A record is serialized as one JSON object followed by a single `\n`.
//! JSON escapes control characters inside strings, so an encoded record never
//! contains a raw `\n` and the stream can be split strictly on the terminator.

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio_util::codec::AnyDelimiterCodec;

use super::dto::{Request, Response};

/// Byte that terminates every record on the wire
pub const LINE_TERMINATOR: u8 = b'\n';

/// Longest accepted line, excluding the terminator
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Errors raised by the wire codec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Nothing but (optional) whitespace and terminator
    #[error("empty record")]
    Empty,

    /// Not exactly one well-formed record
    #[error("malformed record: {0}")]
    Malformed(String),

    #[error("failed to encode record: {0}")]
    Encode(String),
}

/// Serialize a record and append the line terminator
pub fn encode<T: Serialize>(record: &T) -> Result<Vec<u8>, CodecError> {
    let mut bytes = serde_json::to_vec(record).map_err(|e| CodecError::Encode(e.to_string()))?;
    bytes.push(LINE_TERMINATOR);
    Ok(bytes)
}

/// Parse exactly one record, ignoring a trailing terminator (`\n` or `\r\n`)
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    let bytes = bytes.strip_suffix(&[LINE_TERMINATOR]).unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(CodecError::Empty);
    }
    serde_json::from_slice(bytes).map_err(|e| CodecError::Malformed(e.to_string()))
}

pub fn encode_request(request: &Request) -> Result<Vec<u8>, CodecError> {
    encode(request)
}

pub fn decode_request(bytes: &[u8]) -> Result<Request, CodecError> {
    decode(bytes)
}

pub fn encode_response(response: &Response) -> Result<Vec<u8>, CodecError> {
    encode(response)
}

pub fn decode_response(bytes: &[u8]) -> Result<Response, CodecError> {
    decode(bytes)
}

/// Framing used on both sides of the connection.
///
/// Splits on `\n` without requiring UTF-8, so undecodable bytes surface as a
/// [`CodecError`] from [`decode`] instead of killing the stream.
pub fn line_framing() -> AnyDelimiterCodec {
    AnyDelimiterCodec::new_with_max_length(
        vec![LINE_TERMINATOR],
        vec![LINE_TERMINATOR],
        MAX_LINE_LENGTH,
    )
}
