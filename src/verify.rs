//! Signed message verification
//!
//! Verification hashes the message, parses the signature, recovers the
//! signer's public key and checks whether the claimed address is one of the
//! two P2PKH addresses (compressed and uncompressed) of that key. Every
//! failure along the way means "does not verify".

use crate::curves::{CurveArithmetic, Secp256k1};
use crate::error::{MessageError, Result};
use crate::keys::{Network, address_from_sec};
use crate::message::hash_signed_message;
use crate::recovery::recover_public_key_with;
use crate::signature::{CompressionCheck, parse_signature_with};
use tracing::{debug, trace};

/// Knobs for [`Verifier`]; the default is mainnet with the legacy
/// compressed-flag test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VerifierConfig {
    pub network: Network,
    pub compression: CompressionCheck,
}

#[derive(Debug, Clone)]
pub struct Verifier<A = Secp256k1> {
    config: VerifierConfig,
    arith: A,
}

impl Verifier {
    pub fn new(config: VerifierConfig) -> Self {
        Self::with_arithmetic(config, Secp256k1)
    }
}

impl<A: CurveArithmetic> Verifier<A> {
    pub fn with_arithmetic(config: VerifierConfig, arith: A) -> Self {
        Verifier { config, arith }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// The `[compressed, uncompressed]` addresses of the key that signed `message`
    pub fn recover_addresses(&self, signature: &str, message: &str) -> Result<[String; 2]> {
        let hash = hash_signed_message(message.as_bytes())?;
        let sig = parse_signature_with(signature, self.config.compression)?;
        let point = recover_public_key_with(&self.arith, &sig, &hash)?;

        let version = self.config.network.version_byte();
        let address = |compressed: bool| -> Result<String> {
            let sec = self
                .arith
                .serialize_point(&point, compressed)
                .ok_or_else(|| MessageError::Encoding("recovered point has no SEC encoding".into()))?;
            address_from_sec(&sec, version)
        };
        Ok([address(true)?, address(false)?])
    }

    /// Whether `signature` over `message` was made by the key behind `address`.
    /// Never fails: any error is reported as `false`.
    pub fn verify(&self, address: &str, signature: &str, message: &str) -> bool {
        match self.recover_addresses(signature, message) {
            Ok(candidates) => {
                trace!(?candidates, address, "recovered candidate addresses");
                candidates.iter().any(|candidate| candidate == address)
            }
            Err(err) => {
                debug!(%err, address, "signed message rejected");
                false
            }
        }
    }
}

/// Verify a Bitcoin Signed Message against a mainnet address.
pub fn verify_message(address: &str, signature: &str, message: &str) -> bool {
    Verifier::new(VerifierConfig::default()).verify(address, signature, message)
}

/// [`Verifier::recover_addresses`] with the default configuration
pub fn recover_addresses(signature: &str, message: &str) -> Result<[String; 2]> {
    Verifier::new(VerifierConfig::default()).recover_addresses(signature, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{PublicKey, gen_key_pair};
    use crate::testing::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    fn long_message() -> String {
        "a".repeat(252)
    }

    #[test]
    fn test_known_vector() {
        assert!(verify_message(TEST_UNCOMPRESSED_ADDRESS, HELLO_WORLD_SIG, "hello world"));
        assert!(verify_message(TEST_COMPRESSED_ADDRESS, HELLO_WORLD_SIG, "hello world"));
        assert!(!verify_message(TEST_UNCOMPRESSED_ADDRESS, HELLO_WORLD_SIG, "hello worle"));
        assert!(!verify_message(TEST_UNCOMPRESSED_ADDRESS, HELLO_WORLD_SIG, "Hello world"));
    }

    #[test]
    fn test_recover_addresses_order() {
        let [compressed, uncompressed] = recover_addresses(HELLO_WORLD_SIG, "hello world").unwrap();
        assert_eq!(compressed, TEST_COMPRESSED_ADDRESS);
        assert_eq!(uncompressed, TEST_UNCOMPRESSED_ADDRESS);
    }

    #[test]
    fn test_round_trip_fresh_keys() {
        for compressed in [false, true] {
            let (sk, pk) = gen_key_pair();
            let message = "round trip";
            let sig = sign_message(&sk, message.as_bytes(), compressed);
            for address_compressed in [true, false] {
                let address = pk.address(Network::Main, address_compressed).unwrap();
                assert!(verify_message(&address, &sig, message));
            }
        }
    }

    #[test]
    fn test_wrong_address() {
        let (_, other) = gen_key_pair();
        let address = other.address(Network::Main, false).unwrap();
        assert!(!verify_message(&address, HELLO_WORLD_SIG, "hello world"));
        assert!(!verify_message("", HELLO_WORLD_SIG, "hello world"));
        assert!(!verify_message("not an address", HELLO_WORLD_SIG, "hello world"));
    }

    #[test]
    fn test_tampered_message_every_byte() {
        let message = "pay 1 BTC to carol";
        let (sk, pk) = gen_key_pair();
        let address = pk.address(Network::Main, true).unwrap();
        let sig = sign_message(&sk, message.as_bytes(), true);
        assert!(verify_message(&address, &sig, message));

        for i in 0..message.len() {
            let mut bytes = message.as_bytes().to_vec();
            bytes[i] ^= 0x01;
            let tampered = String::from_utf8(bytes).unwrap();
            assert!(!verify_message(&address, &sig, &tampered), "byte {i}");
        }
    }

    #[test]
    fn test_tampered_signature_every_byte() {
        let raw = STANDARD.decode(HELLO_WORLD_SIG).unwrap();
        for i in 1..65 {
            let mut tampered = raw.clone();
            tampered[i] ^= 0x80;
            let sig = STANDARD.encode(&tampered);
            assert!(
                !verify_message(TEST_UNCOMPRESSED_ADDRESS, &sig, "hello world"),
                "byte {i}"
            );
        }
    }

    #[test]
    fn test_length_boundary() {
        let message = long_message();
        assert!(verify_message(TEST_UNCOMPRESSED_ADDRESS, LONG_MESSAGE_SIG, &message));

        let too_long = format!("{message}a");
        assert!(!verify_message(TEST_UNCOMPRESSED_ADDRESS, LONG_MESSAGE_SIG, &too_long));
        assert!(matches!(
            recover_addresses(LONG_MESSAGE_SIG, &too_long),
            Err(MessageError::UnsupportedLength { what: "message", len: 253 })
        ));
    }

    #[test]
    fn test_malformed_inputs_fail_closed() {
        let cases = ["", "!!!!", "AAAA", "G18iGhQRdsyA7aiggnY6AEmjbJDDy8GS79P0xu1PR+vUX6gQ"];
        for sig in cases {
            assert!(!verify_message(TEST_UNCOMPRESSED_ADDRESS, sig, "hello world"), "{sig:?}");
        }

        // 65 zero bytes: r = 0
        let zeros = STANDARD.encode([0u8; 65]);
        assert!(matches!(
            recover_addresses(&zeros, "hello world"),
            Err(MessageError::RecoveryFailed(_))
        ));
        assert!(!verify_message(TEST_UNCOMPRESSED_ADDRESS, &zeros, "hello world"));
    }

    #[test]
    fn test_compression_check() {
        assert!(verify_message(TEST_COMPRESSED_ADDRESS, HELLO_WORLD_COMPRESSED_SIG, "hello world"));

        let strict = Verifier::new(VerifierConfig {
            compression: CompressionCheck::Strict,
            ..Default::default()
        });
        assert!(strict.verify(TEST_UNCOMPRESSED_ADDRESS, HELLO_WORLD_SIG, "hello world"));
        assert!(!strict.verify(TEST_COMPRESSED_ADDRESS, HELLO_WORLD_COMPRESSED_SIG, "hello world"));
        assert!(matches!(
            strict.recover_addresses(HELLO_WORLD_COMPRESSED_SIG, "hello world"),
            Err(MessageError::UnsupportedEncoding)
        ));
    }

    #[test]
    fn test_testnet_addresses() {
        let verifier = Verifier::new(VerifierConfig {
            network: Network::Test,
            ..Default::default()
        });
        let pk = PublicKey::from_sk_hex(TEST_SECRET_KEY).unwrap();
        let testnet = pk.address(Network::Test, false).unwrap();
        assert!(verifier.verify(&testnet, HELLO_WORLD_SIG, "hello world"));
        assert!(!verifier.verify(TEST_UNCOMPRESSED_ADDRESS, HELLO_WORLD_SIG, "hello world"));
    }

    #[test]
    fn test_deterministic() {
        let first = verify_message(TEST_UNCOMPRESSED_ADDRESS, HELLO_WORLD_SIG, "hello world");
        let second = verify_message(TEST_UNCOMPRESSED_ADDRESS, HELLO_WORLD_SIG, "hello world");
        assert_eq!(first, second);
        assert_eq!(
            recover_addresses(HELLO_WORLD_SIG, "hello world").unwrap(),
            recover_addresses(HELLO_WORLD_SIG, "hello world").unwrap()
        );
    }

    #[test]
    fn test_concurrent_verification() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    verify_message(TEST_UNCOMPRESSED_ADDRESS, HELLO_WORLD_SIG, "hello world")
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
