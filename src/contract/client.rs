//! Alloy-backed land registry client.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint and verify the chain id
//! - Execute contract reads (`eth_call`) and the signed registration write
//! - Handle timeouts and classify transport vs. contract failures

use std::time::Duration;

use alloy::consensus::TxReceipt;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use alloy::transports::TransportError;
use async_trait::async_trait;
use tokio::time::timeout;

use crate::config::ContractConfig;
use crate::contract::registry::Registry;
use crate::contract::types::{ChainStatus, DeedRecord, LandRecord, RegistrationRecord};
use crate::contract::wallet::OperatorWallet;
use crate::error::{GatewayError, GatewayResult};

sol! {
    #[sol(rpc)]
    contract LandRegistry {
        function landInfo(uint256 tokenId) external view returns (string blockInfo, string parcelInfo, uint256 totalSupply);
        function deedInfo(uint256 tokenId) external view returns (string deedHash, address issuedTo, uint256 issuedAt);
        function ownerOf(uint256 tokenId) external view returns (address owner);
        function balanceOf(address owner) external view returns (uint256 balance);
        function totalSupply() external view returns (uint256 supply);
        function registerLand(address to, string blockInfo, string parcelInfo) external returns (uint256 tokenId);

        /// Emitted when a parcel is registered.
        #[derive(Debug)]
        event LandRegistered(uint256 indexed tokenId, address indexed owner, string blockInfo, string parcelInfo);
    }
}

type SharedProvider = DynProvider;

/// Land registry contract client.
#[derive(Clone)]
pub struct RegistryClient {
    /// RPC provider; carries the operator signer when one is configured.
    provider: SharedProvider,
    /// Bound contract instance.
    contract: LandRegistry::LandRegistryInstance<SharedProvider>,
    /// Operator address, if write operations are enabled.
    operator: Option<Address>,
    /// Per-call timeout.
    timeout_duration: Duration,
}

impl RegistryClient {
    /// Connect to the configured endpoint and verify it serves the
    /// expected chain.
    ///
    /// Bad URL / contract address / chain-id mismatch are configuration
    /// errors; an unreachable endpoint is a connection error.
    pub async fn connect(
        config: &ContractConfig,
        wallet: Option<OperatorWallet>,
    ) -> GatewayResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            GatewayError::Configuration(format!("invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let address: Address = config.contract_address.parse().map_err(|e| {
            GatewayError::Configuration(format!(
                "invalid contract address '{}': {}",
                config.contract_address, e
            ))
        })?;

        let operator = wallet.as_ref().map(|w| w.address());
        let provider: SharedProvider = match wallet {
            Some(wallet) => DynProvider::new(
                ProviderBuilder::new()
                    .wallet(wallet.into_signer())
                    .connect_http(url),
            ),
            None => DynProvider::new(ProviderBuilder::new().connect_http(url)),
        };

        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);

        let client = Self {
            contract: LandRegistry::new(address, provider.clone()),
            provider,
            operator,
            timeout_duration,
        };

        // Chain-id probe doubles as the reachability check.
        let chain_id = client.fetch_chain_id().await?;
        if chain_id != config.chain_id {
            return Err(GatewayError::Configuration(format!(
                "chain id mismatch: expected {}, endpoint reports {}",
                config.chain_id, chain_id
            )));
        }

        tracing::info!(
            rpc_url = %config.rpc_url,
            contract = %address,
            chain_id = chain_id,
            write_enabled = operator.is_some(),
            "Contract client connected"
        );

        Ok(client)
    }

    /// Operator address, when write operations are enabled.
    pub fn operator(&self) -> Option<Address> {
        self.operator
    }

    async fn fetch_chain_id(&self) -> GatewayResult<u64> {
        match timeout(self.timeout_duration, self.provider.get_chain_id()).await {
            Ok(Ok(id)) => Ok(id),
            Ok(Err(e)) => Err(map_rpc_err(&e)),
            Err(_) => Err(self.timeout_error()),
        }
    }

    /// Run a contract call with the configured timeout.
    async fn contract_call<T>(
        &self,
        fut: impl std::future::IntoFuture<Output = Result<T, alloy::contract::Error>>,
    ) -> GatewayResult<T> {
        match timeout(self.timeout_duration, fut.into_future()).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(map_contract_err(&e)),
            Err(_) => Err(self.timeout_error()),
        }
    }

    fn timeout_error(&self) -> GatewayError {
        GatewayError::Connection(format!(
            "RPC timeout after {} seconds",
            self.timeout_duration.as_secs()
        ))
    }
}

#[async_trait]
impl Registry for RegistryClient {
    async fn land_info(&self, token_id: U256) -> GatewayResult<LandRecord> {
        let ret = self
            .contract_call(self.contract.landInfo(token_id).call())
            .await?;
        Ok(LandRecord {
            block_info: ret.blockInfo,
            parcel_info: ret.parcelInfo,
            total_supply: ret.totalSupply,
        })
    }

    async fn owner_of(&self, token_id: U256) -> GatewayResult<Address> {
        self.contract_call(self.contract.ownerOf(token_id).call())
            .await
    }

    async fn deed_info(&self, token_id: U256, caller: Option<Address>) -> GatewayResult<DeedRecord> {
        let mut call = self.contract.deedInfo(token_id);
        // The contract checks msg.sender; forward the caller so the check
        // sees the identity that reached the gateway.
        if let Some(caller) = caller {
            call = call.from(caller);
        }
        let ret = self.contract_call(call.call()).await?;
        Ok(DeedRecord {
            deed_hash: ret.deedHash,
            issued_to: ret.issuedTo,
            issued_at: ret.issuedAt,
        })
    }

    async fn balance_of(&self, owner: Address) -> GatewayResult<U256> {
        self.contract_call(self.contract.balanceOf(owner).call())
            .await
    }

    async fn total_supply(&self) -> GatewayResult<U256> {
        self.contract_call(self.contract.totalSupply().call()).await
    }

    async fn register_land(
        &self,
        to: Address,
        block_info: String,
        parcel_info: String,
    ) -> GatewayResult<RegistrationRecord> {
        if self.operator.is_none() {
            return Err(GatewayError::Configuration(
                "write operations disabled: no operator key configured".into(),
            ));
        }

        let pending = self
            .contract_call(
                self.contract
                    .registerLand(to, block_info, parcel_info)
                    .send(),
            )
            .await?;

        // Receipt wait spans block production, not a single RPC round trip.
        let receipt = timeout(
            self.timeout_duration.saturating_mul(6),
            pending.get_receipt(),
        )
        .await
        .map_err(|_| self.timeout_error())?
        .map_err(|e| GatewayError::Operation(format!("registration not confirmed: {}", e)))?;

        if !receipt.inner.status() {
            return Err(GatewayError::Operation(format!(
                "registration transaction reverted: {}",
                receipt.transaction_hash
            )));
        }

        let token_id = receipt
            .inner
            .logs()
            .iter()
            .find_map(|log| log.log_decode::<LandRegistry::LandRegistered>().ok())
            .map(|decoded| decoded.inner.tokenId)
            .ok_or_else(|| {
                GatewayError::Operation("registration receipt missing LandRegistered event".into())
            })?;

        Ok(RegistrationRecord {
            token_id,
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number.unwrap_or_default(),
        })
    }

    async fn chain_status(&self) -> GatewayResult<ChainStatus> {
        let chain_id = self.fetch_chain_id().await?;
        let block_number = match timeout(self.timeout_duration, self.provider.get_block_number())
            .await
        {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(map_rpc_err(&e)),
            Err(_) => return Err(self.timeout_error()),
        };
        Ok(ChainStatus {
            chain_id,
            block_number,
        })
    }
}

/// Classify a contract-call failure.
///
/// A JSON-RPC error response (revert, permission check, bad call data) is
/// an operation failure and keeps the node's message verbatim; everything
/// else at the transport layer means the endpoint is unusable.
fn map_contract_err(err: &alloy::contract::Error) -> GatewayError {
    match err {
        alloy::contract::Error::TransportError(rpc) => match rpc.as_error_resp() {
            Some(resp) => GatewayError::Operation(resp.message.to_string()),
            None => GatewayError::Connection(err.to_string()),
        },
        _ => GatewayError::Operation(err.to_string()),
    }
}

fn map_rpc_err(err: &TransportError) -> GatewayError {
    match err.as_error_resp() {
        Some(resp) => GatewayError::Operation(resp.message.to_string()),
        None => GatewayError::Connection(err.to_string()),
    }
}

impl std::fmt::Debug for RegistryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryClient")
            .field("contract", self.contract.address())
            .field("operator", &self.operator)
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}
