//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file (--config-file / RELOADER_CONFIG)
//!     → loader.rs (parse & deserialize)
//!     → overlaid by flags / environment (schema.rs)
//!     → validation.rs (semantic checks)
//!     → WatchConfig (validated, immutable)
//!     → passed by value into the watch loop
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload of our own settings
//! - Only the reload signal has a default (SIGHUP)
//! - Validation separates syntactic (serde/clap) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{FileConfig, ReloaderArgs, WatchConfig};
pub use validation::ValidationError;
