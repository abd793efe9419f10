//! Gateway error taxonomy.
//!
//! # Responsibilities
//! - Classify every failure the gateway can surface to a caller
//! - Map each class to an HTTP status code and a stable kind tag
//! - Keep the contract/accessor layers free of HTTP concerns

use axum::http::StatusCode;
use thiserror::Error;

/// Errors surfaced by the gateway.
///
/// `NotInitialized` is internal: the accessor's acquire step recovers it
/// with a single re-initialization. Every other variant reaches the caller
/// as a failure envelope.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Required configuration is missing or invalid (endpoint URL,
    /// contract address, chain id). Fatal to initialization.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The RPC endpoint is unreachable or dropped the connection.
    /// Retryable via re-initialization on the next request.
    #[error("connection error: {0}")]
    Connection(String),

    /// No live contract handle. Recovered by one re-init attempt.
    #[error("contract client not initialized")]
    NotInitialized,

    /// Malformed caller input. Never retried, never reaches the contract.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The contract call itself failed (revert, permission, not-found).
    /// Surfaced verbatim as `details` in the error envelope.
    #[error("contract call failed: {0}")]
    Operation(String),
}

impl GatewayError {
    /// HTTP status for this error class.
    ///
    /// Client mistakes map to 400, backend failures to 502, a handle that
    /// could not be re-established to 503.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Operation(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Connection(_) => StatusCode::BAD_GATEWAY,
            GatewayError::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The underlying failure message, without the variant prefix.
    ///
    /// This is what the error envelope carries as `details` — e.g. a
    /// contract revert reason verbatim.
    pub fn detail(&self) -> String {
        match self {
            GatewayError::Configuration(m)
            | GatewayError::Connection(m)
            | GatewayError::Validation(m)
            | GatewayError::Operation(m) => m.clone(),
            GatewayError::NotInitialized => "contract client not initialized".to_string(),
        }
    }

    /// Stable machine-readable tag for the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Configuration(_) => "configuration_error",
            GatewayError::Connection(_) => "connection_error",
            GatewayError::NotInitialized => "not_initialized",
            GatewayError::Validation(_) => "validation_error",
            GatewayError::Operation(_) => "operation_error",
        }
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GatewayError::Validation("bad id".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::Operation("reverted".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::NotInitialized.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_error_display() {
        let err = GatewayError::Validation("token id must be a positive integer".into());
        assert_eq!(
            err.to_string(),
            "invalid request: token id must be a positive integer"
        );

        let err = GatewayError::Operation("execution reverted: not authorized".into());
        assert!(err.to_string().contains("execution reverted"));
    }

    #[test]
    fn test_detail_strips_variant_prefix() {
        let err = GatewayError::Operation("execution reverted: not authorized".into());
        assert_eq!(err.detail(), "execution reverted: not authorized");
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(GatewayError::NotInitialized.kind(), "not_initialized");
        assert_eq!(
            GatewayError::Connection("refused".into()).kind(),
            "connection_error"
        );
    }
}
