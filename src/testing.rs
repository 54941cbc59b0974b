//! Fixtures and a recoverable signer for tests

use crate::bitcoin::BITCOIN;
use crate::curves::{mod_inv, scalar_mul, to_32_bytes};
use crate::keys::gen_secret_key;
use crate::message::hash_signed_message;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;

/// SHA-256 of the empty string, used as a secret key
pub const TEST_SECRET_KEY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
pub const TEST_UNCOMPRESSED_ADDRESS: &str = "1HZwkjkeaoZfTSaJxDw6aKkxp45agDiEzN";
pub const TEST_COMPRESSED_ADDRESS: &str = "1F3sAm6ZtwLAUnj7d38pGFxtP3RVEvtsbV";

/// "hello world" signed by [`TEST_SECRET_KEY`], header 27
pub const HELLO_WORLD_SIG: &str =
    "G18iGhQRdsyA7aiggnY6AEmjbJDDy8GS79P0xu1PR+vUX6gQGHTS8mymz9+XGVIR5D+pWgsGMl6ZnkHdEnX7vWM=";
/// "hello world" signed by [`TEST_SECRET_KEY`], header 31 (compressed key marker)
pub const HELLO_WORLD_COMPRESSED_SIG: &str =
    "Hx/dONULwiLxm0U/e6Xe0C3PRVEjdAqdsi9ImxTP1zdsYO6cnbl6GKDLbnIob7w6piTWf/sPq8RuTWA7msqC2HU=";
/// 252 times 'a' signed by [`TEST_SECRET_KEY`]
pub const LONG_MESSAGE_SIG: &str =
    "G2QZ5Im2Gro60xsNXxuc+AdbYkLQcq86I5Ktx/qsCQVIO4iDFA7x8y078MMuEQvwpIhM/Rwr+MZCWwpKjT9llws=";

/// Produce a base64 compact signature the way `signmessage` does: low-S,
/// header `27 + recid`, plus 4 when `compressed`.
pub fn sign_message(sk: &BigInt, message: &[u8], compressed: bool) -> String {
    let n = BITCOIN.n();
    let z = hash_signed_message(message).unwrap().to_bigint();

    loop {
        let k = gen_secret_key(n);
        let point = scalar_mul(&k, BITCOIN.g());
        let (x, y) = (point.x().unwrap(), point.y().unwrap());

        let r = x.mod_floor(n);
        if r.is_zero() {
            continue;
        }
        let mut s = (mod_inv(&k, n).unwrap() * (&z + sk * &r)).mod_floor(n);
        if s.is_zero() {
            continue;
        }

        let mut recid = u8::from(y.is_odd()) | if x >= n { 2 } else { 0 };
        if s > n / 2u32 {
            s = n - &s;
            recid ^= 1;
        }

        let mut raw = vec![27 + recid + if compressed { 4 } else { 0 }];
        raw.extend_from_slice(&to_32_bytes(&r).unwrap());
        raw.extend_from_slice(&to_32_bytes(&s).unwrap());
        return STANDARD.encode(raw);
    }
}
