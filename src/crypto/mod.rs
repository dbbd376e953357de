//! Cryptographic operations for Cosmos key and address generation.
//!
//! This module provides:
//! - The bech32 alphabet split into digit and letter classes
//! - Account address derivation (SHA-256 + RIPEMD-160 + bech32)
//! - Random wallet generation using secp256k1

pub mod address;
pub mod charset;
mod wallet;

pub use address::AddressError;
pub use wallet::Wallet;
