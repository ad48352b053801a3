//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared by the
//! search engine and the referee binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`BRAVERATS_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! BRAVERATS_<SECTION>_<KEY>=value
//!
//! Examples:
//!     BRAVERATS_COMMON_DATA_DIR=/data
//!     BRAVERATS_SEARCH_ITERATIONS=5000
//!     BRAVERATS_SEARCH_ZERO_BUDGET=random
//!     BRAVERATS_REFEREE_MATCHES=1000
//!     BRAVERATS_REFEREE_SEED=42
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;

#[cfg(test)]
mod tests;
