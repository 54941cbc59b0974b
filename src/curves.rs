//! Math over elliptic curves over finite fields: points, addition,
//! scalar multiplication, x-coordinate lifting and SEC serialization.
//!
//! [`CurveArithmetic`] is the seam the recovery code is written against;
//! [`Secp256k1`] backs it with the big-integer arithmetic in this module.

use crate::bitcoin::BITCOIN;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use std::ops::Add;

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) s.t. a * x + b * y == gcd
#[must_use]
pub fn extended_euclidean_algorithm(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
        let next_t = &old_t - &quotient * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    (old_r, old_s, old_t)
}

/// Modular multiplicative inverse m s.t. (n * m) % p == 1, or `None` when
/// `n` and `p` are not coprime (which includes `n ≡ 0`).
#[must_use]
pub fn mod_inv(n: &BigInt, p: &BigInt) -> Option<BigInt> {
    let (gcd, x, _) = extended_euclidean_algorithm(&n.mod_floor(p), p);
    gcd.is_one().then(|| x.mod_floor(p))
}

/// Elliptic Curve over the field of integers modulo a prime.
/// Points on the curve satisfy y^2 = x^3 + a*x + b (mod p).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    pub p: BigInt,
    pub a: BigInt,
    pub b: BigInt,
}

impl Curve {
    pub fn new(p: BigInt, a: BigInt, b: BigInt) -> Self {
        Curve { p, a, b }
    }

    /// Right-hand side of the curve equation, x^3 + a*x + b (mod p)
    fn rhs(&self, x: &BigInt) -> BigInt {
        (x.modpow(&BigInt::from(3), &self.p) + &self.a * x + &self.b).mod_floor(&self.p)
    }

    /// Whether `point` satisfies the curve equation. Infinity is on every curve.
    pub fn contains(&self, point: &Point) -> bool {
        match point {
            Point::Infinity => true,
            Point::Affine { x, y, .. } => {
                x < &self.p && y < &self.p && (y * y).mod_floor(&self.p) == self.rhs(x)
            }
        }
    }

    /// Find the point with x-coordinate `x` and the requested y parity.
    ///
    /// Takes the square root as `y^((p+1)/4)`, which requires `p ≡ 3 (mod 4)`.
    /// Returns `None` when `x` is not the abscissa of any curve point.
    pub fn lift_x(&self, x: &BigInt, odd: bool) -> Option<Point> {
        let x = x.mod_floor(&self.p);
        let y2 = self.rhs(&x);
        let exp = (&self.p + BigInt::one()) >> 2;
        let mut y = y2.modpow(&exp, &self.p);
        if (&y * &y).mod_floor(&self.p) != y2 {
            return None;
        }
        if y.is_odd() != odd {
            y = (&self.p - &y).mod_floor(&self.p);
        }
        Some(Point::new(self.clone(), x, y))
    }
}

/// An integer point (x,y) on a Curve, or the point at infinity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine { curve: Curve, x: BigInt, y: BigInt },
}

impl Point {
    #[must_use]
    pub fn new(curve: Curve, x: BigInt, y: BigInt) -> Self {
        Point::Affine { curve, x, y }
    }

    #[must_use]
    pub const fn infinity() -> Self {
        Point::Infinity
    }

    #[must_use]
    #[inline]
    pub const fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    pub fn x(&self) -> Option<&BigInt> {
        match self {
            Point::Affine { x, .. } => Some(x),
            Point::Infinity => None,
        }
    }

    pub fn y(&self) -> Option<&BigInt> {
        match self {
            Point::Affine { y, .. } => Some(y),
            Point::Infinity => None,
        }
    }

    /// SEC encoding: `02|03 || x` when compressed, `04 || x || y` otherwise.
    /// The point at infinity has no encoding.
    pub fn to_sec(&self, compressed: bool) -> Option<Vec<u8>> {
        let Point::Affine { x, y, .. } = self else {
            return None;
        };
        let mut out = Vec::with_capacity(if compressed { 33 } else { 65 });
        if compressed {
            out.push(if y.is_odd() { 0x03 } else { 0x02 });
            out.extend_from_slice(&to_32_bytes(x)?);
        } else {
            out.push(0x04);
            out.extend_from_slice(&to_32_bytes(x)?);
            out.extend_from_slice(&to_32_bytes(y)?);
        }
        Some(out)
    }
}

/// Big-endian, left-padded 32-byte form of a non-negative integer below 2^256
pub fn to_32_bytes(n: &BigInt) -> Option<[u8; 32]> {
    let (sign, bytes) = n.to_bytes_be();
    if sign == Sign::Minus || bytes.len() > 32 {
        return None;
    }
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    Some(out)
}

fn point_add_impl(lhs: &Point, rhs: &Point) -> Point {
    let (curve, x1, y1, x2, y2) = match (lhs, rhs) {
        (Point::Infinity, _) => return rhs.clone(),
        (_, Point::Infinity) => return lhs.clone(),
        (
            Point::Affine { curve, x: x1, y: y1 },
            Point::Affine { x: x2, y: y2, .. },
        ) => (curve, x1, y1, x2, y2),
    };
    let p = &curve.p;

    // P + (-P), and doubling a point with y == 0
    if x1 == x2 && (y1 + y2).mod_floor(p).is_zero() {
        return Point::infinity();
    }

    let (numerator, denominator) = if x1 == x2 {
        (BigInt::from(3) * x1 * x1 + &curve.a, BigInt::from(2) * y1)
    } else {
        (y1 - y2, x1 - x2)
    };
    let Some(inv) = mod_inv(&denominator, p) else {
        return Point::infinity();
    };
    let m = (numerator * inv).mod_floor(p);

    let rx = (&m * &m - x1 - x2).mod_floor(p);
    let ry = (-(&m * (&rx - x1) + y1)).mod_floor(p);

    Point::new(curve.clone(), rx, ry)
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Point {
        point_add_impl(&self, &other)
    }
}

impl Add<&Point> for &Point {
    type Output = Point;

    #[inline]
    fn add(self, other: &Point) -> Point {
        point_add_impl(self, other)
    }
}

/// Double-and-add scalar multiplication
#[must_use]
pub fn scalar_mul(k: &BigInt, point: &Point) -> Point {
    debug_assert!(*k >= BigInt::zero(), "scalar must be non-negative");
    let mut result = Point::infinity();
    let mut addend = point.clone();
    let mut k = k.clone();

    while !k.is_zero() {
        if k.is_odd() {
            result = &result + &addend;
        }
        addend = &addend + &addend;
        k >>= 1;
    }
    result
}

/// A generator over a curve: an initial point and the (pre-computed) order
#[derive(Debug, Clone)]
pub struct Generator {
    pub g: Point,  // A generator point on the curve
    pub n: BigInt, // The order of the generating point, so 0*G = n*G = INF
}

impl Generator {
    #[must_use]
    pub const fn new(g: Point, n: BigInt) -> Self {
        Generator { g, n }
    }
}

/// The curve operations public-key recovery needs.
pub trait CurveArithmetic {
    type Point;

    /// Order of the generator
    fn order(&self) -> &BigInt;

    /// Prime of the underlying field
    fn field_prime(&self) -> &BigInt;

    fn mod_inverse(&self, k: &BigInt, modulus: &BigInt) -> Option<BigInt>;

    /// Point with the given x-coordinate and y parity, if one exists
    fn point_from_x(&self, x: &BigInt, odd: bool) -> Option<Self::Point>;

    /// `u1*G + u2*point`; `None` if the sum is the point at infinity
    fn scalar_multiply_and_add(
        &self,
        u1: &BigInt,
        u2: &BigInt,
        point: &Self::Point,
    ) -> Option<Self::Point>;

    /// SEC bytes, 33 long when compressed and 65 otherwise
    fn serialize_point(&self, point: &Self::Point, compressed: bool) -> Option<Vec<u8>>;
}

/// [`CurveArithmetic`] over the process-wide secp256k1 parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1;

impl CurveArithmetic for Secp256k1 {
    type Point = Point;

    fn order(&self) -> &BigInt {
        BITCOIN.n()
    }

    fn field_prime(&self) -> &BigInt {
        BITCOIN.p()
    }

    fn mod_inverse(&self, k: &BigInt, modulus: &BigInt) -> Option<BigInt> {
        mod_inv(k, modulus)
    }

    fn point_from_x(&self, x: &BigInt, odd: bool) -> Option<Point> {
        BITCOIN.curve.lift_x(x, odd)
    }

    fn scalar_multiply_and_add(&self, u1: &BigInt, u2: &BigInt, point: &Point) -> Option<Point> {
        let q = scalar_mul(u1, BITCOIN.g()) + scalar_mul(u2, point);
        (!q.is_infinity()).then_some(q)
    }

    fn serialize_point(&self, point: &Point, compressed: bool) -> Option<Vec<u8>> {
        point.to_sec(compressed)
    }
}
