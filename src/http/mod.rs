//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (hyper http1 connection, graceful shutdown tracking)
//!     → Axum router (timeouts, request tracing)
//!     → handlers.rs
//!         GET <liveness path>  → 200, empty body
//!         GET <readiness path> → run checks → JSON, 200 or 500
//!     → Send to client
//! ```

pub mod handlers;
pub mod server;

pub use server::{ReadyServer, ServerBuilder, ServerError};
