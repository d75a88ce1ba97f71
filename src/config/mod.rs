//! Configuration module for printstack
//!
//! Configuration hierarchy:
//! 1. Environment variables (PRINTSTACK_*) (highest priority)
//! 2. Project config (`<dir>/printstack.toml`)
//! 3. User config (`<config dir>/printstack/config.toml`)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::ConfigWarning;
pub use types::{BuilderConfig, EngineConfig, FormatConfig, NamingConfig};
