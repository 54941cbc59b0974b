//! ECDSA public key recovery
//!
//! Given a signature `(r, s)` over hash `e` and the recovery id, the signer's
//! public key is `Q = r⁻¹ (s·R - e·G)`, where `R` is the curve point whose
//! x-coordinate is `r` (or `r + n` when recovery id bit 1 is set) and whose
//! y parity is recovery id bit 0.

use crate::curves::{CurveArithmetic, Secp256k1};
use crate::error::{MessageError, Result};
use crate::keys::PublicKey;
use crate::message::MessageHash;
use crate::signature::RecoverableSignature;
use num_integer::Integer;
use num_traits::Zero;

/// Recover the secp256k1 public key that produced `sig` over `hash`.
pub fn recover_public_key(sig: &RecoverableSignature, hash: &MessageHash) -> Result<PublicKey> {
    let point = recover_public_key_with(&Secp256k1, sig, hash)?;
    PublicKey::from_point(point)
}

/// Recovery written against any [`CurveArithmetic`] backend.
pub fn recover_public_key_with<A: CurveArithmetic>(
    arith: &A,
    sig: &RecoverableSignature,
    hash: &MessageHash,
) -> Result<A::Point> {
    let order = arith.order();
    let prime = arith.field_prime();

    if sig.r.is_zero() {
        return Err(MessageError::RecoveryFailed("r is zero"));
    }

    let mut rx = sig.r.clone();
    if sig.recovery_id & 2 != 0 {
        rx += order;
        if &rx >= prime {
            return Err(MessageError::RecoveryFailed("r + n is outside the field"));
        }
    }

    let r_point = arith
        .point_from_x(&rx.mod_floor(prime), sig.recovery_id & 1 != 0)
        .ok_or(MessageError::RecoveryFailed("no curve point for r"))?;

    let r_inv = arith
        .mod_inverse(&sig.r, order)
        .ok_or(MessageError::RecoveryFailed("r is not invertible"))?;

    let e = hash.to_bigint();
    let u1 = order - (&r_inv * &e).mod_floor(order);
    let u2 = (&r_inv * &sig.s).mod_floor(order);

    arith
        .scalar_multiply_and_add(&u1, &u2, &r_point)
        .ok_or(MessageError::RecoveryFailed("recovered point at infinity"))
}
