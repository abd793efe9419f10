//! Singleton accessor for the contract client handle.
//!
//! # Responsibilities
//! - Own the one live handle per process
//! - Initialize it from configuration through an injected factory
//! - Provide the lazy acquire policy every request handler uses
//!
//! # Design Decisions
//! - The slot is an `ArcSwapOption`: replacement is a single atomic swap,
//!   reads are lock-free, and a stale-but-valid handle at worst produces a
//!   retryable failure
//! - A mutex serializes concurrent initialization attempts; it is held
//!   only across construction plus the swap, never across request calls

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::config::ContractConfig;
use crate::contract::client::RegistryClient;
use crate::contract::registry::Registry;
use crate::contract::wallet::OperatorWallet;
use crate::error::{GatewayError, GatewayResult};

/// A live, initialized contract handle plus the metadata it was built from.
pub struct RegistryHandle {
    /// The operation capability.
    pub registry: Arc<dyn Registry>,
    /// RPC endpoint the handle is bound to.
    pub endpoint: String,
    /// Deployed contract address.
    pub contract_address: String,
    /// Operator address when write operations are enabled.
    pub operator: Option<alloy::primitives::Address>,
}

/// Builds handles from configuration. Injected so tests can substitute a
/// factory that never touches a chain.
#[async_trait]
pub trait RegistryFactory: Send + Sync {
    async fn connect(&self, config: &ContractConfig) -> GatewayResult<RegistryHandle>;
}

/// Production factory: alloy client, operator key from the environment.
pub struct AlloyRegistryFactory;

#[async_trait]
impl RegistryFactory for AlloyRegistryFactory {
    async fn connect(&self, config: &ContractConfig) -> GatewayResult<RegistryHandle> {
        let wallet = OperatorWallet::from_env()?;
        let operator = wallet.as_ref().map(|w| w.address());
        let client = RegistryClient::connect(config, wallet).await?;
        Ok(RegistryHandle {
            registry: Arc::new(client),
            endpoint: config.rpc_url.clone(),
            contract_address: config.contract_address.clone(),
            operator,
        })
    }
}

/// Process-wide accessor owning the singleton contract handle.
pub struct RegistryAccessor {
    slot: ArcSwapOption<RegistryHandle>,
    init_lock: Mutex<()>,
    factory: Arc<dyn RegistryFactory>,
    config: ContractConfig,
}

impl RegistryAccessor {
    /// Create an accessor backed by the alloy factory.
    pub fn new(config: ContractConfig) -> Self {
        Self::with_factory(config, Arc::new(AlloyRegistryFactory))
    }

    /// Create an accessor with an explicit handle factory.
    pub fn with_factory(config: ContractConfig, factory: Arc<dyn RegistryFactory>) -> Self {
        Self {
            slot: ArcSwapOption::const_empty(),
            init_lock: Mutex::new(()),
            factory,
            config,
        }
    }

    /// Construct a fresh handle and make it the singleton.
    ///
    /// Idempotent in effect: a second call replaces the handle rather than
    /// erroring. Fails with `Configuration` or `Connection` per the
    /// factory; the slot keeps its previous value on failure.
    pub async fn initialize(&self) -> GatewayResult<Arc<RegistryHandle>> {
        let _guard = self.init_lock.lock().await;
        let handle = Arc::new(self.factory.connect(&self.config).await?);
        self.slot.store(Some(handle.clone()));
        tracing::info!(
            endpoint = %handle.endpoint,
            contract = %handle.contract_address,
            "Contract handle initialized"
        );
        Ok(handle)
    }

    /// The current handle, or `NotInitialized` if none is live.
    pub fn get(&self) -> GatewayResult<Arc<RegistryHandle>> {
        self.slot.load_full().ok_or(GatewayError::NotInitialized)
    }

    /// Discard the singleton so the next `get()` forces re-initialization.
    ///
    /// Called when a handle is observed to be unusable (transport failure
    /// mid-request).
    pub fn invalidate(&self) {
        self.slot.store(None);
        tracing::warn!("Contract handle invalidated");
    }

    /// The two-step acquire policy: `get()`, and on `NotInitialized`
    /// initialize once and `get()` exactly once more. No retry beyond the
    /// single re-init step; repeated failure propagates to the caller.
    pub async fn acquire(&self) -> GatewayResult<Arc<RegistryHandle>> {
        match self.get() {
            Ok(handle) => Ok(handle),
            Err(GatewayError::NotInitialized) => {
                tracing::debug!("No live contract handle, initializing on demand");
                self.initialize().await?;
                self.get()
            }
            Err(e) => Err(e),
        }
    }
}
