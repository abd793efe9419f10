//! API request handlers.
//!
//! Every handler follows the same shape: validate raw input, run exactly
//! one contract operation through the shared accessor, and return the
//! response envelope. Failures are mapped, never propagated — a broken
//! request leaves the gateway ready for the next one.

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use alloy::primitives::{Address, U256};

use crate::error::{GatewayError, GatewayResult};
use crate::http::envelope::{self, Envelope};
use crate::http::server::AppState;
use crate::observability::metrics;

// ==================== Response Types ====================

/// A land parcel with the supply observed at query time.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LandDetails {
    /// Token id, decimal.
    #[schema(example = "1")]
    pub token_id: String,
    /// Survey block descriptor.
    #[schema(example = "Block A1")]
    pub block_info: String,
    /// Parcel descriptor within the block.
    #[schema(example = "Parcel P1")]
    pub parcel_info: String,
    /// Total registered parcels, decimal (may exceed u64).
    #[schema(example = "1000")]
    pub total_supply: String,
}

/// Owner of a parcel.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LandOwner {
    pub token_id: String,
    /// Checksummed owner address.
    pub owner: String,
}

/// Deed details for a parcel.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeedDetails {
    pub token_id: String,
    /// Hash of the off-chain deed document.
    pub deed_hash: String,
    /// Address the deed was issued to.
    pub issued_to: String,
    /// Issuance unix timestamp, decimal.
    pub issued_at: String,
}

/// Parcel count held by an owner.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerBalance {
    pub owner: String,
    /// Decimal count (may exceed u64).
    pub balance: String,
}

/// Total registered parcels.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplyInfo {
    /// Decimal count (may exceed u64).
    #[schema(example = "1000")]
    pub total_supply: String,
}

/// Outcome of a confirmed registration.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationOutcome {
    /// Minted token id, decimal.
    pub token_id: String,
    /// Registration transaction hash.
    pub tx_hash: String,
    /// Inclusion block number.
    pub block_number: u64,
}

/// Gateway and chain status.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GatewayStatus {
    pub version: String,
    pub chain_id: u64,
    pub block_number: u64,
    pub contract_address: String,
    /// Operator address when write operations are enabled.
    pub operator: Option<String>,
    pub write_enabled: bool,
}

// ==================== Request Types ====================

/// Body of a registration request.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterLandRequest {
    /// Address the parcel is registered to.
    pub owner: String,
    /// Survey block descriptor.
    pub block_info: String,
    /// Parcel descriptor within the block.
    pub parcel_info: String,
}

/// Query parameters for the deed endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct DeedQuery {
    /// Caller address forwarded to the contract's permission check.
    pub caller: Option<String>,
}

// ==================== Input Validation ====================

/// Parse a decimal token id. Rejects anything that is not a positive
/// integer before the contract is ever touched.
fn parse_token_id(raw: &str) -> GatewayResult<U256> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GatewayError::Validation(format!(
            "token id must be a positive integer, got '{}'",
            raw
        )));
    }
    let id = U256::from_str_radix(trimmed, 10).map_err(|_| {
        GatewayError::Validation(format!("token id out of range: '{}'", raw))
    })?;
    if id.is_zero() {
        return Err(GatewayError::Validation(
            "token id must be greater than zero".into(),
        ));
    }
    Ok(id)
}

fn parse_address(raw: &str, what: &str) -> GatewayResult<Address> {
    Address::from_str(raw.trim()).map_err(|_| {
        GatewayError::Validation(format!(
            "{} must be a 0x-prefixed 20-byte hex address, got '{}'",
            what, raw
        ))
    })
}

// ==================== Handlers ====================

/// GET /api/v1/lands/{id}
///
/// Fetch a parcel's descriptors together with the current total supply.
#[utoipa::path(
    get,
    path = "/api/v1/lands/{id}",
    tag = "lands",
    params(
        ("id" = String, Path, description = "Token id of the parcel (decimal)")
    ),
    responses(
        (status = 200, description = "Land details", body = Envelope<LandDetails>),
        (status = 400, description = "Malformed token id", body = Envelope<LandDetails>),
        (status = 502, description = "Contract call failed", body = Envelope<LandDetails>)
    )
)]
pub async fn get_land(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    const ENDPOINT: &str = "/api/v1/lands/{id}";
    match fetch_land(&state, &id).await {
        Ok(data) => Envelope::ok(data, "Land details fetched successfully"),
        Err(err) => envelope::failure(ENDPOINT, "Failed to fetch land details", err),
    }
}

async fn fetch_land(state: &AppState, raw_id: &str) -> GatewayResult<LandDetails> {
    let token_id = parse_token_id(raw_id)?;
    let record = state
        .with_registry(move |handle| async move { handle.registry.land_info(token_id).await })
        .await?;
    Ok(LandDetails {
        token_id: token_id.to_string(),
        block_info: record.block_info,
        parcel_info: record.parcel_info,
        total_supply: record.total_supply.to_string(),
    })
}

/// GET /api/v1/lands/{id}/owner
#[utoipa::path(
    get,
    path = "/api/v1/lands/{id}/owner",
    tag = "lands",
    params(
        ("id" = String, Path, description = "Token id of the parcel (decimal)")
    ),
    responses(
        (status = 200, description = "Current owner", body = Envelope<LandOwner>),
        (status = 400, description = "Malformed token id", body = Envelope<LandOwner>),
        (status = 502, description = "Contract call failed", body = Envelope<LandOwner>)
    )
)]
pub async fn get_land_owner(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    const ENDPOINT: &str = "/api/v1/lands/{id}/owner";
    match fetch_land_owner(&state, &id).await {
        Ok(data) => Envelope::ok(data, "Land owner fetched successfully"),
        Err(err) => envelope::failure(ENDPOINT, "Failed to fetch land owner", err),
    }
}

async fn fetch_land_owner(state: &AppState, raw_id: &str) -> GatewayResult<LandOwner> {
    let token_id = parse_token_id(raw_id)?;
    let owner = state
        .with_registry(move |handle| async move { handle.registry.owner_of(token_id).await })
        .await?;
    Ok(LandOwner {
        token_id: token_id.to_string(),
        owner: owner.to_string(),
    })
}

/// GET /api/v1/lands/{id}/deed
///
/// The contract restricts deed reads to the deed holder; the optional
/// `caller` parameter is forwarded as the call's sender so the on-chain
/// check sees the original caller.
#[utoipa::path(
    get,
    path = "/api/v1/lands/{id}/deed",
    tag = "lands",
    params(
        ("id" = String, Path, description = "Token id of the parcel (decimal)"),
        DeedQuery
    ),
    responses(
        (status = 200, description = "Deed details", body = Envelope<DeedDetails>),
        (status = 400, description = "Malformed token id or caller", body = Envelope<DeedDetails>),
        (status = 502, description = "Contract call failed or rejected", body = Envelope<DeedDetails>)
    )
)]
pub async fn get_deed(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeedQuery>,
) -> Response {
    const ENDPOINT: &str = "/api/v1/lands/{id}/deed";
    match fetch_deed(&state, &id, query.caller.as_deref()).await {
        Ok(data) => Envelope::ok(data, "Deed details fetched successfully"),
        Err(err) => envelope::failure(ENDPOINT, "Failed to fetch deed details", err),
    }
}

async fn fetch_deed(
    state: &AppState,
    raw_id: &str,
    raw_caller: Option<&str>,
) -> GatewayResult<DeedDetails> {
    let token_id = parse_token_id(raw_id)?;
    let caller = raw_caller
        .map(|raw| parse_address(raw, "caller"))
        .transpose()?;
    let record = state
        .with_registry(move |handle| async move {
            handle.registry.deed_info(token_id, caller).await
        })
        .await?;
    Ok(DeedDetails {
        token_id: token_id.to_string(),
        deed_hash: record.deed_hash,
        issued_to: record.issued_to.to_string(),
        issued_at: record.issued_at.to_string(),
    })
}

/// GET /api/v1/owners/{address}/balance
#[utoipa::path(
    get,
    path = "/api/v1/owners/{address}/balance",
    tag = "owners",
    params(
        ("address" = String, Path, description = "Owner address (0x-prefixed hex)")
    ),
    responses(
        (status = 200, description = "Parcel count", body = Envelope<OwnerBalance>),
        (status = 400, description = "Malformed address", body = Envelope<OwnerBalance>),
        (status = 502, description = "Contract call failed", body = Envelope<OwnerBalance>)
    )
)]
pub async fn get_owner_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Response {
    const ENDPOINT: &str = "/api/v1/owners/{address}/balance";
    match fetch_owner_balance(&state, &address).await {
        Ok(data) => Envelope::ok(data, "Owner balance fetched successfully"),
        Err(err) => envelope::failure(ENDPOINT, "Failed to fetch owner balance", err),
    }
}

async fn fetch_owner_balance(state: &AppState, raw_address: &str) -> GatewayResult<OwnerBalance> {
    let owner = parse_address(raw_address, "owner")?;
    let balance = state
        .with_registry(move |handle| async move { handle.registry.balance_of(owner).await })
        .await?;
    Ok(OwnerBalance {
        owner: owner.to_string(),
        balance: balance.to_string(),
    })
}

/// GET /api/v1/supply
#[utoipa::path(
    get,
    path = "/api/v1/supply",
    tag = "lands",
    responses(
        (status = 200, description = "Total registered parcels", body = Envelope<SupplyInfo>),
        (status = 502, description = "Contract call failed", body = Envelope<SupplyInfo>)
    )
)]
pub async fn get_supply(State(state): State<AppState>) -> Response {
    const ENDPOINT: &str = "/api/v1/supply";
    let result = state
        .with_registry(|handle| async move { handle.registry.total_supply().await })
        .await;
    match result {
        Ok(supply) => Envelope::ok(
            SupplyInfo {
                total_supply: supply.to_string(),
            },
            "Total supply fetched successfully",
        ),
        Err(err) => envelope::failure(ENDPOINT, "Failed to fetch total supply", err),
    }
}

/// POST /api/v1/lands
///
/// Register a new parcel. The transaction is signed by the gateway
/// operator and the minted token id is read back from the receipt.
#[utoipa::path(
    post,
    path = "/api/v1/lands",
    tag = "lands",
    request_body = RegisterLandRequest,
    responses(
        (status = 200, description = "Parcel registered", body = Envelope<RegistrationOutcome>),
        (status = 400, description = "Malformed request body", body = Envelope<RegistrationOutcome>),
        (status = 502, description = "Registration failed on-chain", body = Envelope<RegistrationOutcome>)
    )
)]
pub async fn register_land(
    State(state): State<AppState>,
    payload: Result<Json<RegisterLandRequest>, JsonRejection>,
) -> Response {
    const ENDPOINT: &str = "/api/v1/lands";
    match submit_registration(&state, payload).await {
        Ok(data) => Envelope::ok(data, "Land registered successfully"),
        Err(err) => envelope::failure(ENDPOINT, "Failed to register land", err),
    }
}

async fn submit_registration(
    state: &AppState,
    payload: Result<Json<RegisterLandRequest>, JsonRejection>,
) -> GatewayResult<RegistrationOutcome> {
    let Json(request) =
        payload.map_err(|rejection| GatewayError::Validation(rejection.body_text()))?;

    let owner = parse_address(&request.owner, "owner")?;
    if request.block_info.trim().is_empty() {
        return Err(GatewayError::Validation("blockInfo must not be empty".into()));
    }
    if request.parcel_info.trim().is_empty() {
        return Err(GatewayError::Validation("parcelInfo must not be empty".into()));
    }

    let block_info = request.block_info;
    let parcel_info = request.parcel_info;
    let record = state
        .with_registry(move |handle| async move {
            handle
                .registry
                .register_land(owner, block_info, parcel_info)
                .await
        })
        .await?;

    Ok(RegistrationOutcome {
        token_id: record.token_id.to_string(),
        tx_hash: record.tx_hash.to_string(),
        block_number: record.block_number,
    })
}

/// GET /api/v1/status
#[utoipa::path(
    get,
    path = "/api/v1/status",
    tag = "gateway",
    responses(
        (status = 200, description = "Gateway and chain status", body = Envelope<GatewayStatus>),
        (status = 502, description = "Chain probe failed", body = Envelope<GatewayStatus>)
    )
)]
pub async fn get_status(State(state): State<AppState>) -> Response {
    const ENDPOINT: &str = "/api/v1/status";
    let result = state
        .with_registry(|handle| async move {
            let chain = handle.registry.chain_status().await?;
            Ok(GatewayStatus {
                version: env!("CARGO_PKG_VERSION").to_string(),
                chain_id: chain.chain_id,
                block_number: chain.block_number,
                contract_address: handle.contract_address.clone(),
                operator: handle.operator.map(|a| a.to_string()),
                write_enabled: handle.operator.is_some(),
            })
        })
        .await;
    match result {
        Ok(data) => Envelope::ok(data, "Gateway status fetched successfully"),
        Err(err) => envelope::failure(ENDPOINT, "Failed to fetch gateway status", err),
    }
}

/// GET /health
///
/// Infrastructure liveness probe; not part of the enveloped API surface.
pub async fn health(State(state): State<AppState>) -> Response {
    let probe = state
        .with_registry(|handle| async move { handle.registry.chain_status().await })
        .await;
    match probe {
        Ok(status) => {
            metrics::record_rpc_health(true);
            (
                StatusCode::OK,
                Json(json!({
                    "status": "up",
                    "chainId": status.chain_id,
                    "blockNumber": status.block_number,
                })),
            )
                .into_response()
        }
        Err(err) => {
            metrics::record_rpc_health(false);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "reason": err.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// Fallback for unmatched routes: still an envelope, never a framework
/// error page.
pub async fn not_found(uri: axum::http::Uri) -> Response {
    envelope::route_not_found(uri.path())
}
