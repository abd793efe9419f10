//! Uniform response envelope.
//!
//! # Responsibilities
//! - Shape every API response as `{ success, data | error, message, timestamp }`
//! - Keep `data` and `error` mutually exclusive
//! - Emit the single diagnostic log line per failed request
//!
//! # Design Decisions
//! - Handlers never propagate errors past their boundary; they always
//!   return an envelope, never a framework error page
//! - Wide numeric values are rendered as decimal strings upstream of this
//!   module; the envelope never touches number formatting

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::GatewayError;

/// Error payload of a failed envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Stable machine-readable error class.
    pub kind: String,
    /// Human-readable description of what failed.
    pub message: String,
    /// Underlying failure message, verbatim.
    pub details: String,
    /// RFC 3339 time the failure was observed.
    pub timestamp: String,
    /// Logical endpoint template that was being served.
    pub endpoint: String,
}

/// The response shape every API route returns.
///
/// Exactly one of `data` / `error` is present, and `success` is consistent
/// with which.
#[derive(Debug, Serialize, ToSchema)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    pub message: String,
    pub timestamp: String,
}

impl<T: Serialize> Envelope<T> {
    /// 200 envelope wrapping `data`.
    pub fn ok(data: T, message: impl Into<String>) -> Response {
        let body = Self {
            success: true,
            data: Some(data),
            error: None,
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}

/// Failure envelope for `endpoint`, with the status code the error class
/// maps to. Logs exactly one diagnostic line.
pub fn failure(endpoint: &str, message: &str, err: GatewayError) -> Response {
    tracing::error!(endpoint = endpoint, error = %err, "{}", message);

    let timestamp = Utc::now().to_rfc3339();
    let body = Envelope::<()> {
        success: false,
        data: None,
        error: Some(ErrorBody {
            kind: err.kind().to_string(),
            message: message.to_string(),
            details: err.detail(),
            timestamp: timestamp.clone(),
            endpoint: endpoint.to_string(),
        }),
        message: message.to_string(),
        timestamp,
    };
    (err.status(), Json(body)).into_response()
}

/// 404 envelope for unmatched routes, so the framework never renders a
/// bare error page.
pub fn route_not_found(path: &str) -> Response {
    let timestamp = Utc::now().to_rfc3339();
    let message = "No matching route".to_string();
    let body = Envelope::<()> {
        success: false,
        data: None,
        error: Some(ErrorBody {
            kind: "not_found".to_string(),
            message: message.clone(),
            details: format!("no route for '{}'", path),
            timestamp: timestamp.clone(),
            endpoint: path.to_string(),
        }),
        message,
        timestamp,
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
