//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",      // Current directory
    "../config.toml",   // Parent directory (when running from subdirectory)
    "/app/config.toml", // Docker container
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by BRAVERATS_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
/// 4. Docker container path (/app/config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("BRAVERATS_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from BRAVERATS_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "BRAVERATS_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, f32, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Optional parseable field (Option<u32>, Option<u64>, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = Some(v);
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: BRAVERATS_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.data_dir, "BRAVERATS_COMMON_DATA_DIR");
    env_override!(config, common.log_level, "BRAVERATS_COMMON_LOG_LEVEL");

    // Search
    env_override!(
        config,
        search.iterations,
        "BRAVERATS_SEARCH_ITERATIONS",
        parse
    );
    env_override!(
        config,
        search.exploration,
        "BRAVERATS_SEARCH_EXPLORATION",
        parse
    );
    env_override!(config, search.zero_budget, "BRAVERATS_SEARCH_ZERO_BUDGET");
    env_override!(
        config,
        search.max_rollout_plies,
        "BRAVERATS_SEARCH_MAX_ROLLOUT_PLIES",
        parse
    );
    env_override!(config, search.verbose, "BRAVERATS_SEARCH_VERBOSE", parse);

    // Referee
    env_override!(
        config,
        referee.matches,
        "BRAVERATS_REFEREE_MATCHES",
        parse
    );
    env_override!(config, referee.red_brain, "BRAVERATS_REFEREE_RED_BRAIN");
    env_override!(config, referee.blue_brain, "BRAVERATS_REFEREE_BLUE_BRAIN");
    env_override!(
        config,
        referee.red_iterations,
        "BRAVERATS_REFEREE_RED_ITERATIONS",
        optional_parse
    );
    env_override!(
        config,
        referee.blue_iterations,
        "BRAVERATS_REFEREE_BLUE_ITERATIONS",
        optional_parse
    );
    env_override!(
        config,
        referee.seed,
        "BRAVERATS_REFEREE_SEED",
        optional_parse
    );
    env_override!(
        config,
        referee.concurrency,
        "BRAVERATS_REFEREE_CONCURRENCY",
        parse
    );
    env_override!(
        config,
        referee.log_interval,
        "BRAVERATS_REFEREE_LOG_INTERVAL",
        parse
    );

    config
}
