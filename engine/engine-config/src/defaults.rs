//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time, so the binary and the
//! documented defaults can never drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    search: SearchDefaults,
    referee: RefereeDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    data_dir: String,
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    iterations: u32,
    exploration: f32,
    zero_budget: String,
    max_rollout_plies: u32,
    verbose: bool,
}

#[derive(Debug, Deserialize)]
struct RefereeDefaults {
    matches: u32,
    red_brain: String,
    blue_brain: String,
    concurrency: usize,
    log_interval: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn data_dir() -> &'static str {
    &DEFAULTS.common.data_dir
}
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Search
pub fn iterations() -> u32 {
    DEFAULTS.search.iterations
}
pub fn exploration() -> f32 {
    DEFAULTS.search.exploration
}
pub fn zero_budget() -> &'static str {
    &DEFAULTS.search.zero_budget
}
pub fn max_rollout_plies() -> u32 {
    DEFAULTS.search.max_rollout_plies
}
pub fn verbose() -> bool {
    DEFAULTS.search.verbose
}

// Referee
pub fn matches() -> u32 {
    DEFAULTS.referee.matches
}
pub fn red_brain() -> &'static str {
    &DEFAULTS.referee.red_brain
}
pub fn blue_brain() -> &'static str {
    &DEFAULTS.referee.blue_brain
}
pub fn concurrency() -> usize {
    DEFAULTS.referee.concurrency
}
pub fn log_interval() -> u32 {
    DEFAULTS.referee.log_interval
}
