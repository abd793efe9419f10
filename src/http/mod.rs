//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, routing)
//!     → request.rs (request ID)
//!     → handlers.rs (validate, one contract call via accessor)
//!     → envelope.rs (uniform success/error shape)
//!     → Send to client
//! ```

pub mod envelope;
pub mod handlers;
pub mod request;
pub mod server;

pub use envelope::{Envelope, ErrorBody};
pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
