//! Liveness and readiness probe server.
//!
//! Wraps a registry of named health checks behind two HTTP endpoints for
//! orchestration platforms: a readiness endpoint that runs every check on
//! each request and a liveness endpoint that always answers 200.
//!
//! ```rust,no_run
//! use readysrv::{Checks, CheckError, ReadyServer};
//!
//! # async fn example() -> Result<(), readysrv::ServerError> {
//! let checks = Checks::new()
//!     .with("cache", || Err::<(), _>("connection to cache is broken"))
//!     .with("database", || Ok::<_, CheckError>(()));
//!
//! let server = ReadyServer::builder(checks).address("127.0.0.1:9999").build();
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::{HttpSettings, ServerSettings};
pub use health::{CheckError, Checker, Checks, ProbeResult, ReadinessReport};
pub use http::{ReadyServer, ServerBuilder, ServerError};
pub use lifecycle::Shutdown;
pub use observability::logging::{Logger, NoopLogger, TracingLogger};
