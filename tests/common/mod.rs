//! Shared utilities for gateway integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use tokio::net::TcpListener;

use land_gateway::config::{ContractConfig, GatewayConfig};
use land_gateway::contract::accessor::{RegistryAccessor, RegistryFactory, RegistryHandle};
use land_gateway::contract::registry::Registry;
use land_gateway::contract::types::{ChainStatus, DeedRecord, LandRecord, RegistrationRecord};
use land_gateway::error::{GatewayError, GatewayResult};
use land_gateway::http::HttpServer;
use land_gateway::lifecycle::Shutdown;

/// Token id the scripted registry always rejects, simulating an on-chain
/// permission revert.
pub const REVERTING_TOKEN_ID: u64 = 99;

/// Deed holder the scripted registry accepts as `caller`.
pub fn deed_holder() -> Address {
    Address::repeat_byte(0x42)
}

/// Scripted in-memory registry with a contract-call counter.
pub struct ScriptedRegistry {
    calls: AtomicUsize,
    supply: U256,
    fail_next_with_connection: AtomicBool,
}

impl ScriptedRegistry {
    pub fn new() -> Arc<Self> {
        Self::with_supply(U256::from(1000u64))
    }

    pub fn with_supply(supply: U256) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            supply,
            fail_next_with_connection: AtomicBool::new(false),
        })
    }

    /// Number of contract operations invoked so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make the next operation fail as if the RPC connection dropped.
    pub fn drop_connection_once(&self) {
        self.fail_next_with_connection.store(true, Ordering::SeqCst);
    }

    fn observe_call(&self) -> GatewayResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_with_connection.swap(false, Ordering::SeqCst) {
            return Err(GatewayError::Connection("connection reset by peer".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl Registry for ScriptedRegistry {
    async fn land_info(&self, token_id: U256) -> GatewayResult<LandRecord> {
        self.observe_call()?;
        if token_id == U256::from(REVERTING_TOKEN_ID) {
            return Err(GatewayError::Operation(
                "execution reverted: not authorized".into(),
            ));
        }
        Ok(LandRecord {
            block_info: "Block A1".into(),
            parcel_info: "Parcel P1".into(),
            total_supply: self.supply,
        })
    }

    async fn owner_of(&self, _token_id: U256) -> GatewayResult<Address> {
        self.observe_call()?;
        Ok(deed_holder())
    }

    async fn deed_info(&self, token_id: U256, caller: Option<Address>) -> GatewayResult<DeedRecord> {
        self.observe_call()?;
        if caller != Some(deed_holder()) {
            return Err(GatewayError::Operation(
                "execution reverted: caller is not the deed holder".into(),
            ));
        }
        Ok(DeedRecord {
            deed_hash: format!("0xdeed{:060x}", token_id),
            issued_to: deed_holder(),
            issued_at: U256::from(1_700_000_000u64),
        })
    }

    async fn balance_of(&self, _owner: Address) -> GatewayResult<U256> {
        self.observe_call()?;
        Ok(U256::from(3u64))
    }

    async fn total_supply(&self) -> GatewayResult<U256> {
        self.observe_call()?;
        Ok(self.supply)
    }

    async fn register_land(
        &self,
        _to: Address,
        _block_info: String,
        _parcel_info: String,
    ) -> GatewayResult<RegistrationRecord> {
        self.observe_call()?;
        Ok(RegistrationRecord {
            token_id: U256::from(7u64),
            tx_hash: TxHash::repeat_byte(0x11),
            block_number: 42,
        })
    }

    async fn chain_status(&self) -> GatewayResult<ChainStatus> {
        self.observe_call()?;
        Ok(ChainStatus {
            chain_id: 31337,
            block_number: 1234,
        })
    }
}

/// Factory handing out the scripted registry, with a connect counter.
pub struct ScriptedFactory {
    registry: Arc<ScriptedRegistry>,
    connects: AtomicUsize,
}

impl ScriptedFactory {
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistryFactory for ScriptedFactory {
    async fn connect(&self, config: &ContractConfig) -> GatewayResult<RegistryHandle> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(RegistryHandle {
            registry: self.registry.clone(),
            endpoint: config.rpc_url.clone(),
            contract_address: config.contract_address.clone(),
            operator: Some(deed_holder()),
        })
    }
}

/// Spawn a gateway on a loopback port backed by the scripted registry.
///
/// The handle is NOT pre-initialized: the first request exercises the
/// accessor's lazy acquire path. Keep the returned `Shutdown` alive for
/// the duration of the test.
#[allow(dead_code)]
pub async fn spawn_gateway(
    registry: Arc<ScriptedRegistry>,
) -> (SocketAddr, Shutdown, Arc<ScriptedFactory>) {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.contract.contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".into();

    let factory = Arc::new(ScriptedFactory {
        registry,
        connects: AtomicUsize::new(0),
    });
    let accessor = Arc::new(RegistryAccessor::with_factory(
        config.contract.clone(),
        factory.clone(),
    ));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    let server = HttpServer::new(config, accessor);
    tokio::spawn(async move {
        let _ = server.run(listener, shutdown_rx).await;
    });

    (addr, shutdown, factory)
}
