//! Cosmos SDK account address derivation.

use bech32::{Bech32, Hrp};
use ripemd::{Digest, Ripemd160};
use sha2::Sha256;

/// Length of the bech32 data portion of an account address: 32 characters
/// for the 160-bit digest plus a 6 character checksum.
pub const DATA_LEN: usize = 38;

/// The bech32 separator between the human-readable prefix and the data.
pub const SEPARATOR: char = '1';

/// Errors raised while building an address.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("invalid bech32 prefix: {0}")]
    InvalidPrefix(#[from] bech32::primitives::hrp::Error),

    #[error("bech32 encoding failed: {0}")]
    Encode(#[from] bech32::EncodeError),

    #[error("invalid secret key: {0}")]
    InvalidSecretKey(#[from] secp256k1::Error),
}

/// Computes the 20 byte account hash, `RIPEMD160(SHA256(pubkey))`.
#[inline]
pub fn account_hash(public_key: &[u8; 33]) -> [u8; 20] {
    let sha = Sha256::digest(public_key);
    Ripemd160::digest(sha).into()
}

/// Parses `prefix` as a bech32 human-readable part.
pub fn parse_prefix(prefix: &str) -> Result<Hrp, AddressError> {
    Ok(Hrp::parse(prefix)?)
}

/// Encodes an account hash under `prefix`.
pub fn encode_address(prefix: &str, hash: &[u8; 20]) -> Result<String, AddressError> {
    let hrp = parse_prefix(prefix)?;
    Ok(bech32::encode::<Bech32>(hrp, hash)?)
}

/// Checks that addresses can be encoded under `prefix`.
pub fn check_prefix(prefix: &str) -> Result<(), AddressError> {
    encode_address(prefix, &[0u8; 20]).map(|_| ())
}

/// Total length of an address for `prefix`.
#[inline]
pub fn address_len(prefix: &str) -> usize {
    prefix.len() + 1 + DATA_LEN
}
