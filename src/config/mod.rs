//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! Library (settings.rs):
//!     builder option → FLEX_READYSRV_* env var → built-in default
//!     → ServerSettings (resolved once, immutable)
//!
//! Binary (loader.rs):
//!     config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FileConfig, whose values become builder options
//! ```
//!
//! # Design Decisions
//! - Resolution never fails; empty or missing values fall back to defaults
//! - All file fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod settings;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::FileConfig;
pub use settings::{HttpSettings, Overrides, ServerSettings};
