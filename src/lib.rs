//! Land Registry Gateway Library

pub mod config;
pub mod contract;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod openapi;

pub use config::GatewayConfig;
pub use contract::{Registry, RegistryAccessor, RegistryFactory, RegistryHandle};
pub use error::{GatewayError, GatewayResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
