//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Library:
//!     server lifecycle lines → Logger sink (logging.rs)
//!     connection/check diagnostics → tracing events
//!
//! Binary:
//!     tracing events → tracing-subscriber (text or JSON on stdout)
//! ```

pub mod logging;

pub use logging::{init_tracing, LogFormat, Logger, NoopLogger, TracingLogger};
