//! Contract-side domain types.

use alloy::primitives::{Address, TxHash, U256};

// Re-export ContractConfig from config module to avoid duplication
pub use crate::config::schema::ContractConfig;

/// A land parcel as recorded on-chain.
///
/// `total_supply` rides along with every parcel query because the contract
/// returns it in the same call; it stays `U256` until the HTTP layer
/// renders it as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandRecord {
    /// Survey block descriptor.
    pub block_info: String,
    /// Parcel descriptor within the block.
    pub parcel_info: String,
    /// Total number of registered parcels at query time.
    pub total_supply: U256,
}

/// Deed details for a parcel. Reading this on-chain is permissioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeedRecord {
    /// Hash of the off-chain deed document.
    pub deed_hash: String,
    /// Address the deed was issued to.
    pub issued_to: Address,
    /// Issuance time as a unix timestamp (contract-reported).
    pub issued_at: U256,
}

/// Outcome of a confirmed land registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRecord {
    /// Token id minted for the new parcel.
    pub token_id: U256,
    /// Transaction hash of the registration.
    pub tx_hash: TxHash,
    /// Block the transaction was included in.
    pub block_number: u64,
}

/// Snapshot of the chain as seen through the RPC endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainStatus {
    /// Chain id reported by the endpoint.
    pub chain_id: u64,
    /// Latest block number.
    pub block_number: u64,
}
