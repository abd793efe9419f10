//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::str::FromStr;

use alloy::primitives::Address;

use crate::config::schema::GatewayConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "contract.rpc_url").
    pub field: String,
    /// Human-readable reason.
    pub reason: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".into(),
            reason: format!("not a valid socket address: '{}'", config.listener.bind_address),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_secs".into(),
            reason: "must be greater than zero".into(),
        });
    }

    match url::Url::parse(&config.contract.rpc_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError {
            field: "contract.rpc_url".into(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field: "contract.rpc_url".into(),
            reason: format!("invalid URL: {}", e),
        }),
    }

    if config.contract.contract_address.is_empty() {
        errors.push(ValidationError {
            field: "contract.contract_address".into(),
            reason: "must be set".into(),
        });
    } else if Address::from_str(&config.contract.contract_address).is_err() {
        errors.push(ValidationError {
            field: "contract.contract_address".into(),
            reason: format!("not a valid address: '{}'", config.contract.contract_address),
        });
    }

    if config.contract.chain_id == 0 {
        errors.push(ValidationError {
            field: "contract.chain_id".into(),
            reason: "must be greater than zero".into(),
        });
    }

    if config.contract.rpc_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "contract.rpc_timeout_secs".into(),
            reason: "must be greater than zero".into(),
        });
    }

    if let Some(metrics_address) = &config.observability.metrics_address {
        if metrics_address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError {
                field: "observability.metrics_address".into(),
                reason: format!("not a valid socket address: '{}'", metrics_address),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "127.0.0.1:8080".into();
        config.contract.contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".into();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_contract_address() {
        let mut config = valid_config();
        config.contract.contract_address = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "contract.contract_address"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.contract.rpc_url = "ftp://example.com".into();
        config.contract.chain_id = 0;
        config.timeouts.request_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_bad_bind_address() {
        let mut config = valid_config();
        config.listener.bind_address = "not-an-address".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "listener.bind_address");
    }
}
