//! Contract integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment variable (operator key)
//!     → wallet.rs (key loading)
//!     → client.rs (provider + contract bindings, timeouts)
//!     → accessor.rs (singleton handle, lazy acquire policy)
//!     → registry.rs trait consumed by request handlers
//! ```
//!
//! # Security Constraints
//! - Operator key ONLY from the environment
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod accessor;
pub mod client;
pub mod registry;
pub mod types;
pub mod wallet;

pub use accessor::{AlloyRegistryFactory, RegistryAccessor, RegistryFactory, RegistryHandle};
pub use client::RegistryClient;
pub use registry::Registry;
pub use types::{ChainStatus, ContractConfig, DeedRecord, LandRecord, RegistrationRecord};
pub use wallet::OperatorWallet;
