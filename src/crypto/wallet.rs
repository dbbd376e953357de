//! Cosmos account wallet generation.

use std::fmt;

use secp256k1::{PublicKey, SecretKey, SECP256K1};

use super::address::{account_hash, encode_address, AddressError};

/// A secp256k1 keypair together with its bech32 account address.
#[derive(Clone, PartialEq, Eq)]
pub struct Wallet {
    address: String,
    public_key: [u8; 33],
    private_key: [u8; 32],
}

impl Wallet {
    /// Generates a new random wallet under `prefix`.
    ///
    /// # Panics
    /// Panics if the address cannot be encoded. Callers validate the prefix
    /// before searching, so this only fires on a broken invariant.
    #[inline]
    pub fn generate(prefix: &str) -> Self {
        match Self::try_generate(prefix) {
            Ok(wallet) => wallet,
            Err(e) => panic!("address encoding invariant violated: {e}"),
        }
    }

    /// Generates a new random wallet under `prefix`.
    ///
    /// Uses the thread-local CSPRNG seeded from the operating system.
    pub fn try_generate(prefix: &str) -> Result<Self, AddressError> {
        let (secret_key, public_key) = SECP256K1.generate_keypair(&mut rand::thread_rng());
        Self::from_keys(prefix, &secret_key, &public_key)
    }

    /// Derives the wallet for an existing secret key.
    pub fn from_secret_key(prefix: &str, secret_bytes: [u8; 32]) -> Result<Self, AddressError> {
        let secret_key = SecretKey::from_slice(&secret_bytes)?;
        let public_key = PublicKey::from_secret_key_global(&secret_key);
        Self::from_keys(prefix, &secret_key, &public_key)
    }

    fn from_keys(
        prefix: &str,
        secret_key: &SecretKey,
        public_key: &PublicKey,
    ) -> Result<Self, AddressError> {
        let public_key = public_key.serialize();
        let address = encode_address(prefix, &account_hash(&public_key))?;

        Ok(Self {
            address,
            public_key,
            private_key: secret_key.secret_bytes(),
        })
    }

    /// Returns the bech32 account address.
    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the compressed public key.
    pub fn public_key(&self) -> &[u8; 33] {
        &self.public_key
    }

    /// Returns the private key bytes.
    pub fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key)
    }

    pub fn private_key_hex(&self) -> String {
        hex::encode(self.private_key)
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("public_key", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Address:\t{}", self.address)?;
        writeln!(f, "Public key:\t{}", self.public_key_hex())?;
        write!(f, "Private key:\t{}", self.private_key_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::address::address_len;

    #[test]
    fn test_generate_wallet() {
        let wallet = Wallet::generate("cosmos");
        assert!(wallet.address().starts_with("cosmos1"));
        assert_eq!(wallet.address().len(), 45);
        assert_eq!(wallet.public_key().len(), 33);
        assert_eq!(wallet.private_key().len(), 32);
    }

    #[test]
    fn test_generate_wallet_with_prefix() {
        for prefix in ["osmo", "juno", "celestia", "a"] {
            let wallet = Wallet::generate(prefix);
            assert!(wallet.address().starts_with(&format!("{prefix}1")));
            assert_eq!(wallet.address().len(), address_len(prefix));
        }
    }

    #[test]
    fn test_wallets_are_independent() {
        let a = Wallet::generate("cosmos");
        let b = Wallet::generate("cosmos");
        assert_ne!(a.private_key(), b.private_key());
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn test_deterministic_wallet() {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        let wallet = Wallet::from_secret_key("cosmos", secret).unwrap();

        assert_eq!(
            wallet.address(),
            "cosmos1w508d6qejxtdg4y5r3zarvary0c5xw7k6ah60c"
        );
        assert_eq!(
            wallet.public_key_hex(),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(
            wallet.private_key_hex(),
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
    }

    #[test]
    fn test_zero_secret_key_rejected() {
        let result = Wallet::from_secret_key("cosmos", [0u8; 32]);
        assert!(matches!(result, Err(AddressError::InvalidSecretKey(_))));
    }

    #[test]
    fn test_invalid_prefix_is_error() {
        assert!(matches!(
            Wallet::try_generate(""),
            Err(AddressError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn test_display_report() {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        let wallet = Wallet::from_secret_key("cosmos", secret).unwrap();
        let report = wallet.to_string();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Address:\tcosmos1w508d6qejxtdg4y5r3zarvary0c5xw7k6ah60c"
        );
        assert!(lines[1].starts_with("Public key:\t0279be"));
        assert!(lines[2].starts_with("Private key:\t0000"));
    }
}
