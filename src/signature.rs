//! Compact recoverable signatures as produced by `signmessage`
//!
//! Layout (65 bytes, base64 encoded):
//! `header || R (32 bytes) || S (32 bytes)` where `header = 27 + recid (+ 4)`.

use crate::error::{MessageError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use num_bigint::{BigInt, Sign};

const SIGNATURE_LEN: usize = 65;
const HEADER_BASE: u8 = 27;
const COMPRESSED_BIT: u8 = 4;

/// How header bit 2 (the "compressed public key" marker) is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CompressionCheck {
    /// `(header & 4) == 1`, the historical test. A value masked with 4 is
    /// either 0 or 4, so this never fires: headers 31..=34 parse like
    /// 27..=30.
    // XXX: almost certainly meant `!= 0`; kept for compatibility with
    // signatures that already verify.
    #[default]
    Legacy,
    /// `(header & 4) != 0` rejects compressed-key signatures outright.
    Strict,
}

impl CompressionCheck {
    #[allow(clippy::bad_bit_mask)]
    fn is_compressed(self, header: u8) -> bool {
        match self {
            CompressionCheck::Legacy => (header & COMPRESSED_BIT) == 1,
            CompressionCheck::Strict => (header & COMPRESSED_BIT) != 0,
        }
    }
}

/// ECDSA signature (r, s) with the recovery id selecting one of up to four
/// candidate public keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub r: BigInt,
    pub s: BigInt,
    pub recovery_id: u8,
    pub compressed: bool,
}

impl RecoverableSignature {
    /// Decode the 65-byte compact form. Bytes past the 65th are ignored.
    pub fn decode(raw: &[u8], check: CompressionCheck) -> Result<Self> {
        if raw.len() < SIGNATURE_LEN {
            return Err(MessageError::MalformedSignature(raw.len()));
        }

        let header = raw[0].wrapping_sub(HEADER_BASE);
        let compressed = check.is_compressed(header);
        if compressed {
            return Err(MessageError::UnsupportedEncoding);
        }

        Ok(RecoverableSignature {
            r: BigInt::from_bytes_be(Sign::Plus, &raw[1..33]),
            s: BigInt::from_bytes_be(Sign::Plus, &raw[33..65]),
            recovery_id: header & 3,
            compressed,
        })
    }
}

/// Parse a base64 signature with the default [`CompressionCheck`]
pub fn parse_signature(signature: &str) -> Result<RecoverableSignature> {
    parse_signature_with(signature, CompressionCheck::default())
}

pub fn parse_signature_with(signature: &str, check: CompressionCheck) -> Result<RecoverableSignature> {
    let raw = STANDARD.decode(signature)?;
    RecoverableSignature::decode(&raw, check)
}
