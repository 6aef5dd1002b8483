//! Short string <-> `bytes32` encoding.
//!
//! A string is stored as its UTF-8 bytes, right-padded with zeros. At least
//! one zero byte must remain as terminator, so the longest encodable string is
//! 31 bytes.

use alloy::primitives::B256;
use thiserror::Error;

/// Longest string, in bytes, that fits in a `bytes32` with its terminator.
pub const MAX_BYTES32_STRING_LEN: usize = 31;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("bytes32 string must be less than 32 bytes (got {0})")]
    TooLong(usize),

    #[error("bytes32 string must not contain NUL characters")]
    ContainsNul,

    #[error("invalid bytes32 string - no null terminator")]
    MissingTerminator,

    #[error("invalid UTF-8 in bytes32 string: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Encode `value` as a zero-padded `bytes32`.
pub fn format_bytes32_string(value: &str) -> Result<B256, EncodingError> {
    let bytes = value.as_bytes();
    if bytes.len() > MAX_BYTES32_STRING_LEN {
        return Err(EncodingError::TooLong(bytes.len()));
    }
    if bytes.contains(&0) {
        return Err(EncodingError::ContainsNul);
    }

    let mut out = [0u8; 32];
    out[..bytes.len()].copy_from_slice(bytes);
    Ok(B256::from(out))
}

/// Decode a `bytes32` produced by [`format_bytes32_string`].
pub fn parse_bytes32_string(value: &B256) -> Result<String, EncodingError> {
    let bytes = value.as_slice();
    if bytes[31] != 0 {
        return Err(EncodingError::MissingTerminator);
    }
    let len = bytes.iter().take_while(|b| **b != 0).count();
    Ok(std::str::from_utf8(&bytes[..len])?.to_string())
}
