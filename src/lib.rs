//! Bitcoin Signed Message verification
//!
//! Recovers the public key from a compact recoverable ECDSA signature over
//! the "Bitcoin Signed Message" hash and checks it against a claimed address.

pub mod bitcoin;
pub mod curves;
pub mod error;
pub mod hash;
pub mod keys;
pub mod message;
pub mod recovery;
pub mod signature;
pub mod verify;

#[cfg(test)]
mod testing;

pub use error::{MessageError, Result};

pub use bitcoin::BITCOIN;
pub use curves::{Curve, CurveArithmetic, Generator, Point, Secp256k1};
pub use keys::{
    Network, PublicKey, address_to_pkb_hash, b58decode, b58encode, derive_address, gen_key_pair,
    gen_secret_key,
};
pub use message::{MESSAGE_MAGIC, MessageHash, hash_message, hash_signed_message};
pub use recovery::recover_public_key;
pub use signature::{CompressionCheck, RecoverableSignature, parse_signature};
pub use verify::{Verifier, VerifierConfig, recover_addresses, verify_message};
