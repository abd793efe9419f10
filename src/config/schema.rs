//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from config
//! files, and every section has defaults so a minimal config is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the land registry gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Contract and RPC endpoint settings.
    pub contract: ContractConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration for request handling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Contract endpoint configuration.
///
/// The operator signing key is NOT part of the config file; write
/// operations read it from the environment (see `contract::wallet`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Address of the land registry contract.
    pub contract_address: String,

    /// Chain ID (e.g., 1 for Ethereum mainnet, 31337 for local Anvil).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            contract_address: String::new(),
            chain_id: 31337,
            rpc_timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Bind address for the Prometheus exporter; metrics are disabled
    /// when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_address: Some("0.0.0.0:9090".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.contract.chain_id, 31337);
        assert!(config.contract.contract_address.is_empty());
    }

    #[test]
    fn test_minimal_toml() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [contract]
            rpc_url = "http://localhost:8545"
            contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
            chain_id = 31337
            "#,
        )
        .unwrap();
        assert_eq!(
            config.contract.contract_address,
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
        // Untouched sections fall back to defaults.
        assert_eq!(config.observability.log_level, "info");
    }
}
