//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Start (ReadyServer::run):
//!     Bind listener → Idle → Serving → accept loop
//!
//! Stop (ReadyServer::halt):
//!     Serving → Draining → stop accepting → drain connections → Stopped
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → binary calls halt with a drain deadline
//! ```
//!
//! # Design Decisions
//! - Shutdown has a deadline: halt reports a timeout instead of waiting forever
//! - Halting a server that never started is a no-op that prevents a later start

pub mod shutdown;
pub mod signals;

pub use shutdown::{Phase, Shutdown};
pub use signals::shutdown_signal;
