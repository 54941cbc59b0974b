//! secp256k1 parameters shared by every verification

use crate::curves::{Curve, Generator, Point};
use num_bigint::{BigInt, Sign};
use std::sync::LazyLock;

// http://www.oid-info.com/get/1.3.132.0.10
const FIELD_PRIME: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFC, 0x2F,
];

const GROUP_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

const GENERATOR_X: [u8; 32] = [
    0x79, 0xBE, 0x66, 0x7E, 0xF9, 0xDC, 0xBB, 0xAC, 0x55, 0xA0, 0x62, 0x95, 0xCE, 0x87, 0x0B, 0x07,
    0x02, 0x9B, 0xFC, 0xDB, 0x2D, 0xCE, 0x28, 0xD9, 0x59, 0xF2, 0x81, 0x5B, 0x16, 0xF8, 0x17, 0x98,
];

const GENERATOR_Y: [u8; 32] = [
    0x48, 0x3A, 0xDA, 0x77, 0x26, 0xA3, 0xC4, 0x65, 0x5D, 0xA4, 0xFB, 0xFC, 0x0E, 0x11, 0x08, 0xA8,
    0xFD, 0x17, 0xB4, 0x48, 0xA6, 0x85, 0x54, 0x19, 0x9C, 0x47, 0xD0, 0x8F, 0xFB, 0x10, 0xD4, 0xB8,
];

/// Coin wrapper containing the curve and its generator
#[derive(Debug, Clone)]
pub struct Coin {
    pub curve: Curve,
    pub generator: Generator,
}

impl Coin {
    /// Field prime `p`
    #[inline]
    pub fn p(&self) -> &BigInt {
        &self.curve.p
    }

    /// Group order `n`
    #[inline]
    pub fn n(&self) -> &BigInt {
        &self.generator.n
    }

    /// Generator point `G`
    #[inline]
    pub fn g(&self) -> &Point {
        &self.generator.g
    }
}

fn uint(bytes: &[u8; 32]) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, bytes)
}

fn secp256k1() -> Coin {
    let curve = Curve::new(uint(&FIELD_PRIME), BigInt::from(0), BigInt::from(7));
    let g = Point::new(curve.clone(), uint(&GENERATOR_X), uint(&GENERATOR_Y));
    Coin {
        curve,
        generator: Generator::new(g, uint(&GROUP_ORDER)),
    }
}

/// Global Bitcoin configuration (secp256k1)
pub static BITCOIN: LazyLock<Coin> = LazyLock::new(secp256k1);
