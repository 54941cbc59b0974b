//! Public keys, Bitcoin addresses and Base58Check

use crate::bitcoin::BITCOIN;
use crate::curves::{Point, scalar_mul, to_32_bytes};
use crate::error::{MessageError, Result};
use crate::hash::{hash160, hash256};
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::RngCore;

/// Bitcoin network type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Network {
    #[default]
    Main,
    Test,
}

impl Network {
    /// Get version byte for P2PKH addresses
    #[inline]
    pub const fn version_byte(self) -> u8 {
        match self {
            Network::Main => 0x00,
            Network::Test => 0x6f,
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
        }
    }
}

impl TryFrom<&str> for Network {
    type Error = MessageError;

    fn try_from(s: &str) -> Result<Self> {
        match s {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Test),
            _ => Err(MessageError::InvalidFormat(format!("unknown network: {s}"))),
        }
    }
}

/// Generate a secret key with uniform random distribution in [1, n)
pub fn gen_secret_key(n: &BigInt) -> BigInt {
    let mut rng = rand::rng();
    loop {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        let key = BigInt::from_bytes_be(Sign::Plus, &bytes);
        if key >= BigInt::one() && key < *n {
            return key;
        }
    }
}

/// Generate a (secret_key, public_key) pair
pub fn gen_key_pair() -> (BigInt, PublicKey) {
    loop {
        let sk = gen_secret_key(BITCOIN.n());
        if let Ok(pk) = PublicKey::from_sk(&sk) {
            return (sk, pk);
        }
    }
}

/// A finite point on secp256k1, kept as big-endian coordinates
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    x: [u8; 32],
    y: [u8; 32],
}

impl PublicKey {
    /// Fails for the point at infinity
    pub fn from_point(point: Point) -> Result<Self> {
        let (Some(x), Some(y)) = (point.x(), point.y()) else {
            return Err(MessageError::InvalidFormat("point at infinity".into()));
        };
        let coordinate =
            |c: &BigInt| to_32_bytes(c).ok_or_else(|| MessageError::Encoding("coordinate exceeds 32 bytes".into()));
        Ok(PublicKey {
            x: coordinate(x)?,
            y: coordinate(y)?,
        })
    }

    /// Derive public key from secret key
    pub fn from_sk(sk: &BigInt) -> Result<Self> {
        Self::from_point(scalar_mul(&sk.mod_floor(BITCOIN.n()), BITCOIN.g()))
    }

    /// Derive public key from hex string secret key
    pub fn from_sk_hex(sk_hex: &str) -> Result<Self> {
        let bytes = hex::decode(sk_hex)?;
        Self::from_sk(&BigInt::from_bytes_be(Sign::Plus, &bytes))
    }

    /// Decode from SEC binary format
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let point = match (bytes.first(), bytes.len()) {
            (Some(0x04), 65) => Point::new(
                BITCOIN.curve.clone(),
                BigInt::from_bytes_be(Sign::Plus, &bytes[1..33]),
                BigInt::from_bytes_be(Sign::Plus, &bytes[33..65]),
            ),
            (Some(prefix @ (0x02 | 0x03)), 33) => {
                let x = BigInt::from_bytes_be(Sign::Plus, &bytes[1..33]);
                if &x >= BITCOIN.p() {
                    return Err(MessageError::InvalidFormat("x is not a field element".into()));
                }
                BITCOIN
                    .curve
                    .lift_x(&x, *prefix == 0x03)
                    .ok_or_else(|| MessageError::InvalidFormat("x is not on the curve".into()))?
            }
            (None, _) => return Err(MessageError::InvalidFormat("empty public key".into())),
            (Some(prefix), len) => {
                return Err(MessageError::InvalidFormat(format!(
                    "invalid public key: prefix {prefix:#04x}, length {len}"
                )));
            }
        };

        if !BITCOIN.curve.contains(&point) {
            return Err(MessageError::InvalidFormat("point is not on the curve".into()));
        }
        Self::from_point(point)
    }

    /// Encode to SEC format: 33 bytes compressed, 65 bytes uncompressed
    pub fn encode(&self, compressed: bool) -> Vec<u8> {
        let mut out = Vec::with_capacity(65);
        if compressed {
            out.push(if self.y[31] & 1 == 1 { 0x03 } else { 0x02 });
            out.extend_from_slice(&self.x);
        } else {
            out.push(0x04);
            out.extend_from_slice(&self.x);
            out.extend_from_slice(&self.y);
        }
        out
    }

    pub fn point(&self) -> Point {
        Point::new(
            BITCOIN.curve.clone(),
            BigInt::from_bytes_be(Sign::Plus, &self.x),
            BigInt::from_bytes_be(Sign::Plus, &self.y),
        )
    }

    /// Encode and hash with HASH160
    pub fn encode_hash160(&self, compressed: bool) -> [u8; 20] {
        hash160(&self.encode(compressed))
    }

    /// P2PKH address for a network
    pub fn address(&self, net: Network, compressed: bool) -> Result<String> {
        derive_address(self, compressed, net.version_byte())
    }
}

/// P2PKH address of `key` under an explicit version byte
pub fn derive_address(key: &PublicKey, compressed: bool, version: u8) -> Result<String> {
    address_from_sec(&key.encode(compressed), version)
}

/// Base58Check(version || HASH160(sec))
pub fn address_from_sec(sec: &[u8], version: u8) -> Result<String> {
    let mut payload = Vec::with_capacity(25);
    payload.push(version);
    payload.extend_from_slice(&hash160(sec));

    let checksum = hash256(&payload);
    payload.extend_from_slice(&checksum[..4]);

    b58encode(&payload)
}

// -----------------------------------------------------------------------------
// Base58

const ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Base58 encode bytes read as one big-endian integer, with every leading
/// zero byte restored as a leading '1'.
pub fn b58encode(bytes: &[u8]) -> Result<String> {
    let mut n = BigInt::from_bytes_be(Sign::Plus, bytes);
    let fifty_eight = BigInt::from(58);
    let mut chars = Vec::with_capacity(bytes.len() * 138 / 100 + 1);

    while !n.is_zero() {
        let (quotient, remainder) = n.div_rem(&fifty_eight);
        let digit = remainder
            .to_usize()
            .ok_or_else(|| MessageError::Encoding("base58 digit out of range".into()))?;
        chars.push(ALPHABET[digit]);
        n = quotient;
    }

    let leading_zeros = bytes.iter().take_while(|&&b| b == 0).count();
    chars.extend(std::iter::repeat_n(ALPHABET[0], leading_zeros));
    chars.reverse();

    String::from_utf8(chars).map_err(|e| MessageError::Encoding(e.to_string()))
}

/// Base58 decode to bytes, one zero byte per leading '1'
pub fn b58decode(s: &str) -> Result<Vec<u8>> {
    let mut n = BigInt::zero();
    for c in s.bytes() {
        let digit = ALPHABET
            .iter()
            .position(|&x| x == c)
            .ok_or_else(|| MessageError::InvalidFormat(format!("invalid base58 character {:?}", c as char)))?;
        n = n * 58u32 + digit;
    }

    let leading_ones = s.bytes().take_while(|&c| c == b'1').count();
    let mut out = vec![0u8; leading_ones];
    if !n.is_zero() {
        out.extend(n.to_bytes_be().1);
    }
    Ok(out)
}

/// Extract the public key hash from a Base58Check address, validating the checksum
pub fn address_to_pkb_hash(address: &str) -> Result<[u8; 20]> {
    let bytes = b58decode(address)?;
    if bytes.len() != 25 {
        return Err(MessageError::InvalidFormat(format!(
            "address decodes to {} bytes, expected 25",
            bytes.len()
        )));
    }

    let checksum = hash256(&bytes[..21]);
    if checksum[..4] != bytes[21..] {
        return Err(MessageError::InvalidFormat("invalid address checksum".into()));
    }

    let mut pkb_hash = [0u8; 20];
    pkb_hash.copy_from_slice(&bytes[1..21]);
    Ok(pkb_hash)
}
