//! Command line front end for signed message verification
//!
//! ```text
//! bitcoin-message [--testnet] [--strict] <address> <signature> <message>
//! bitcoin-message [--testnet] [--strict] recover <signature> <message>
//! ```

use bitcoin_message::{CompressionCheck, Network, Verifier, VerifierConfig};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: bitcoin-message [--testnet] [--strict] <address> <signature> <message>\n       \
                     bitcoin-message [--testnet] [--strict] recover <signature> <message>";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = VerifierConfig::default();
    let mut args = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--testnet" => config.network = Network::Test,
            "--strict" => config.compression = CompressionCheck::Strict,
            _ => args.push(arg),
        }
    }
    let verifier = Verifier::new(config);

    match args.as_slice() {
        [cmd, signature, message] if cmd == "recover" => {
            match verifier.recover_addresses(signature, message) {
                Ok([compressed, uncompressed]) => {
                    println!("compressed:   {compressed}");
                    println!("uncompressed: {uncompressed}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        [address, signature, message] => {
            if verifier.verify(address, signature, message) {
                println!("valid");
                ExitCode::SUCCESS
            } else {
                println!("invalid");
                ExitCode::FAILURE
            }
        }
        _ => {
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
    }
}
