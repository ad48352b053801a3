//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// ============================================================================

fn d_data_dir() -> String {
    defaults::data_dir().into()
}
fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_iterations() -> u32 {
    defaults::iterations()
}
fn d_exploration() -> f32 {
    defaults::exploration()
}
fn d_zero_budget() -> String {
    defaults::zero_budget().into()
}
fn d_max_rollout_plies() -> u32 {
    defaults::max_rollout_plies()
}
fn d_verbose() -> bool {
    defaults::verbose()
}
fn d_matches() -> u32 {
    defaults::matches()
}
fn d_red_brain() -> String {
    defaults::red_brain().into()
}
fn d_blue_brain() -> String {
    defaults::blue_brain().into()
}
fn d_concurrency() -> usize {
    defaults::concurrency()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub referee: RefereeConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_data_dir")]
    pub data_dir: String,
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir().into(),
            log_level: defaults::log_level().into(),
        }
    }
}

/// UCT search settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(default = "d_iterations")]
    pub iterations: u32,
    #[serde(default = "d_exploration")]
    pub exploration: f32,
    /// "fail" or "random"
    #[serde(default = "d_zero_budget")]
    pub zero_budget: String,
    /// 0 = unlimited
    #[serde(default = "d_max_rollout_plies")]
    pub max_rollout_plies: u32,
    #[serde(default = "d_verbose")]
    pub verbose: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::iterations(),
            exploration: defaults::exploration(),
            zero_budget: defaults::zero_budget().into(),
            max_rollout_plies: defaults::max_rollout_plies(),
            verbose: defaults::verbose(),
        }
    }
}

/// Referee (match runner) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RefereeConfig {
    #[serde(default = "d_matches")]
    pub matches: u32,
    #[serde(default = "d_red_brain")]
    pub red_brain: String,
    #[serde(default = "d_blue_brain")]
    pub blue_brain: String,
    /// Overrides search.iterations for red
    #[serde(default)]
    pub red_iterations: Option<u32>,
    /// Overrides search.iterations for blue
    #[serde(default)]
    pub blue_iterations: Option<u32>,
    /// Base seed; None = seed from entropy
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "d_concurrency")]
    pub concurrency: usize,
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        Self {
            matches: defaults::matches(),
            red_brain: defaults::red_brain().into(),
            blue_brain: defaults::blue_brain().into(),
            red_iterations: None,
            blue_iterations: None,
            seed: None,
            concurrency: defaults::concurrency(),
            log_interval: defaults::log_interval(),
        }
    }
}
