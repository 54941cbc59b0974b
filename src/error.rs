//! Unified error types for signed message verification

use thiserror::Error;

/// Every way a signed message can fail to verify.
///
/// The top-level verifier collapses all of these to `false`; the variants
/// exist so callers of the inner stages can tell failures apart.
#[derive(Debug, Error)]
pub enum MessageError {
    /// Header or message too long for a single-byte length prefix
    #[error("unsupported length: {what} is {len} bytes (must be < 253)")]
    UnsupportedLength { what: &'static str, len: usize },

    #[error("base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("malformed signature: expected 65 bytes, got {0}")]
    MalformedSignature(usize),

    #[error("compressed signature encoding is not supported")]
    UnsupportedEncoding,

    #[error("public key recovery failed: {0}")]
    RecoveryFailed(&'static str),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

impl From<hex::FromHexError> for MessageError {
    fn from(e: hex::FromHexError) -> Self {
        MessageError::InvalidFormat(e.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MessageError>;
