//! The contract operation capability.
//!
//! Request handlers only ever see this trait: a fixed set of named
//! operations, each taking typed arguments and returning a value or a
//! `GatewayError`. The alloy-backed implementation lives in `client.rs`;
//! tests substitute their own.

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

use crate::contract::types::{ChainStatus, DeedRecord, LandRecord, RegistrationRecord};
use crate::error::GatewayResult;

/// Named operations of the land registry contract.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Fetch a parcel's descriptors together with the current supply.
    async fn land_info(&self, token_id: U256) -> GatewayResult<LandRecord>;

    /// Current owner of a parcel.
    async fn owner_of(&self, token_id: U256) -> GatewayResult<Address>;

    /// Deed details for a parcel. The contract restricts this read; when
    /// `caller` is given it becomes the `eth_call` sender so the on-chain
    /// check sees the original caller.
    async fn deed_info(&self, token_id: U256, caller: Option<Address>) -> GatewayResult<DeedRecord>;

    /// Number of parcels held by `owner`.
    async fn balance_of(&self, owner: Address) -> GatewayResult<U256>;

    /// Total number of registered parcels.
    async fn total_supply(&self) -> GatewayResult<U256>;

    /// Register a new parcel, signed by the gateway operator. Waits for
    /// inclusion and returns the minted token id.
    async fn register_land(
        &self,
        to: Address,
        block_info: String,
        parcel_info: String,
    ) -> GatewayResult<RegistrationRecord>;

    /// Probe the RPC endpoint (chain id + latest block).
    async fn chain_status(&self) -> GatewayResult<ChainStatus>;
}
