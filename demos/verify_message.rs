//! Derive addresses for a fresh key and verify a known signed message
//!
//! Run with: cargo run --example verify_message

use bitcoin_message::{Network, gen_key_pair, recover_addresses, verify_message};

fn main() {
    println!("=== Bitcoin Signed Message ===\n");

    let (secret_key, public_key) = gen_key_pair();
    println!("Secret Key (hex):");
    println!("  {secret_key:064x}\n");

    println!("Public Key (compressed):");
    println!("  {}\n", hex::encode(public_key.encode(true)));

    for (label, compressed) in [("compressed", true), ("uncompressed", false)] {
        match public_key.address(Network::Main, compressed) {
            Ok(address) => println!("Address ({label}): {address}"),
            Err(e) => println!("Address ({label}): error: {e}"),
        }
    }

    println!("\n=== Known Signature ===\n");
    let address = "1HZwkjkeaoZfTSaJxDw6aKkxp45agDiEzN";
    let signature =
        "G18iGhQRdsyA7aiggnY6AEmjbJDDy8GS79P0xu1PR+vUX6gQGHTS8mymz9+XGVIR5D+pWgsGMl6ZnkHdEnX7vWM=";

    println!("Address:   {address}");
    println!("Signature: {signature}");
    for message in ["hello world", "hello world!"] {
        let valid = verify_message(address, signature, message);
        println!("{message:?}: {}", if valid { "VALID" } else { "INVALID" });
    }

    if let Ok([compressed, uncompressed]) = recover_addresses(signature, "hello world") {
        println!("\nRecovered: {compressed} / {uncompressed}");
    }
}
