//! # strata-core
//!
//! Configuration types shared by the Strata console crates.

// Configuration types shared across all Strata crates
pub mod config;

// Re-export commonly used config types for convenience
pub use config::{ConfigError, ConsoleConfig, LoggingConfig, ServerConfig, StrataConfig};
