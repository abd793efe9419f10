//! Operator wallet for signed registry writes.
//!
//! # Security
//! - The private key is loaded ONLY from an environment variable
//! - The key is never logged or serialized
//! - A gateway without the variable set runs read-only

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::error::{GatewayError, GatewayResult};

/// Environment variable name for the operator private key.
pub const OPERATOR_KEY_ENV_VAR: &str = "LAND_GATEWAY_OPERATOR_KEY";

/// Signing identity used for registration transactions.
#[derive(Clone)]
pub struct OperatorWallet {
    signer: PrivateKeySigner,
}

impl OperatorWallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// Accepts the key with or without a `0x` prefix. The key is parsed
    /// and held in memory only; it is never logged.
    pub fn from_private_key(private_key_hex: &str) -> GatewayResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex.parse().map_err(|e| {
            GatewayError::Configuration(format!("invalid operator private key: {}", e))
        })?;

        tracing::info!(address = %signer.address(), "Operator wallet loaded");

        Ok(Self { signer })
    }

    /// Load the wallet from `LAND_GATEWAY_OPERATOR_KEY`.
    ///
    /// Returns `None` when the variable is unset (read-only gateway);
    /// a set-but-invalid key is a configuration error.
    pub fn from_env() -> GatewayResult<Option<Self>> {
        match std::env::var(OPERATOR_KEY_ENV_VAR) {
            Ok(key) => Self::from_private_key(&key).map(Some),
            Err(_) => Ok(None),
        }
    }

    /// The operator's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Consume the wallet, yielding the signer for provider construction.
    pub fn into_signer(self) -> PrivateKeySigner {
        self.signer
    }
}

impl std::fmt::Debug for OperatorWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorWallet")
            .field("address", &self.signer.address())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_wallet_from_private_key() {
        let wallet = OperatorWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_wallet_with_0x_prefix() {
        let wallet =
            OperatorWallet::from_private_key(&format!("0x{}", TEST_PRIVATE_KEY)).unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_invalid_private_key() {
        let result = OperatorWallet::from_private_key("invalid_key");
        assert!(matches!(result, Err(GatewayError::Configuration(_))));
    }

    #[test]
    fn test_debug_hides_key() {
        let wallet = OperatorWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let rendered = format!("{:?}", wallet);
        assert!(!rendered.contains("ac0974be"));
    }
}
