//! "Bitcoin Signed Message" hashing

use crate::error::{MessageError, Result};
use crate::hash::hash256;
use num_bigint::{BigInt, Sign};
use std::fmt;

/// Magic header prepended to every signed message
pub const MESSAGE_MAGIC: &str = "Bitcoin Signed Message:\n";

/// Lengths from 0xfd upwards need a multi-byte varint, which is not supported.
const MAX_SHORT_LEN: usize = 0xfd;

/// Double SHA-256 digest of a length-prefixed signed message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHash([u8; 32]);

impl MessageHash {
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The digest as an unsigned big-endian integer
    pub fn to_bigint(&self) -> BigInt {
        BigInt::from_bytes_be(Sign::Plus, &self.0)
    }
}

impl fmt::Display for MessageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

fn short_len(what: &'static str, len: usize) -> Result<u8> {
    if len >= MAX_SHORT_LEN {
        return Err(MessageError::UnsupportedLength { what, len });
    }
    Ok(len as u8)
}

/// Hash `len(header) || header || len(message) || message` with double SHA-256.
///
/// Both lengths are written as a single byte, so each part must be shorter
/// than 253 bytes.
pub fn hash_message(message: &[u8], header: &str) -> Result<MessageHash> {
    let header_len = short_len("header", header.len())?;
    let message_len = short_len("message", message.len())?;

    let mut payload = Vec::with_capacity(2 + header.len() + message.len());
    payload.push(header_len);
    payload.extend_from_slice(header.as_bytes());
    payload.push(message_len);
    payload.extend_from_slice(message);

    Ok(MessageHash(hash256(&payload)))
}

/// [`hash_message`] with the standard [`MESSAGE_MAGIC`] header
pub fn hash_signed_message(message: &[u8]) -> Result<MessageHash> {
    hash_message(message, MESSAGE_MAGIC)
}
