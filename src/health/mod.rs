//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Registry (checks.rs):
//!     name → Checker, fixed at server construction
//!
//! Per readiness request (report.rs):
//!     Run every check once, in map order
//!     → ProbeResult per name
//!     → ReadinessReport (ready = all ok)
//!
//! Built-in checks (probes.rs):
//!     TCP dial and file existence, wired from the config file
//! ```
//!
//! # Design Decisions
//! - Checks are evaluated sequentially on every request; nothing is cached
//! - A failing check is data in the report, never an error
//! - Iteration order is unspecified and callers must not rely on it

pub mod checks;
pub mod probes;
pub mod report;

pub use checks::{CheckError, Checker, Checks};
pub use probes::{FileProbe, TcpProbe};
pub use report::{ProbeResult, ReadinessReport};
