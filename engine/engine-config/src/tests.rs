//! Tests for the configuration module.

use super::*;
use std::io::Write;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.data_dir, "./data");
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.referee.matches, 100);
    assert_eq!(config.referee.red_brain, "uct");
    assert_eq!(config.referee.blue_brain, "random");
}

#[test]
fn test_search_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.search.iterations, 1000);
    assert!((config.search.exploration - 1.0).abs() < f32::EPSILON);
    assert_eq!(config.search.zero_budget, "fail");
    assert_eq!(config.search.max_rollout_plies, 0);
    assert!(!config.search.verbose);
}

#[test]
fn test_referee_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.referee.red_iterations, None);
    assert_eq!(config.referee.blue_iterations, None);
    assert_eq!(config.referee.seed, None);
    assert_eq!(config.referee.concurrency, 4);
    assert_eq!(config.referee.log_interval, 10);
}

#[test]
fn test_braverats_env_overrides() {
    std::env::set_var("BRAVERATS_SEARCH_ITERATIONS", "250");
    std::env::set_var("BRAVERATS_SEARCH_ZERO_BUDGET", "random");
    std::env::set_var("BRAVERATS_REFEREE_SEED", "7");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.search.iterations, 250);
    assert_eq!(config.search.zero_budget, "random");
    assert_eq!(config.referee.seed, Some(7));

    std::env::remove_var("BRAVERATS_SEARCH_ITERATIONS");
    std::env::remove_var("BRAVERATS_SEARCH_ZERO_BUDGET");
    std::env::remove_var("BRAVERATS_REFEREE_SEED");
}

#[test]
fn test_unparseable_env_override_is_ignored() {
    std::env::set_var("BRAVERATS_REFEREE_CONCURRENCY", "lots");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.referee.concurrency, 4);

    std::env::remove_var("BRAVERATS_REFEREE_CONCURRENCY");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
data_dir = "/custom/data"

[search]
iterations = 5000
exploration = 1.4
verbose = true

[referee]
matches = 20
red_brain = "random"
red_iterations = 200
seed = 99
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.data_dir, "/custom/data");
    assert_eq!(config.search.iterations, 5000);
    assert!((config.search.exploration - 1.4).abs() < f32::EPSILON);
    assert!(config.search.verbose);
    assert_eq!(config.referee.matches, 20);
    assert_eq!(config.referee.red_brain, "random");
    assert_eq!(config.referee.red_iterations, Some(200));
    assert_eq!(config.referee.blue_iterations, None);
    assert_eq!(config.referee.seed, Some(99));
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[search]
iterations = 10
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.search.iterations, 10);
    assert_eq!(config.search.zero_budget, "fail"); // Default
    assert_eq!(config.common.data_dir, "./data"); // Default
    assert_eq!(config.referee.concurrency, 4); // Default
}

#[test]
fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[referee]\nmatches = 3\nblue_brain = \"uct\"").unwrap();

    let config = load_from_path(file.path());
    assert_eq!(config.referee.matches, 3);
    assert_eq!(config.referee.blue_brain, "uct");
    assert_eq!(config.common.log_level, "info");
}

#[test]
fn test_invalid_file_falls_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[referee\nmatches = ").unwrap();

    let config = load_from_path(file.path());
    assert_eq!(config.referee.matches, 100);

    let missing = std::path::Path::new("/nonexistent/braverats/config.toml");
    let config = load_from_path(missing);
    assert_eq!(config.common.log_level, "info");
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.common.data_dir, cloned.common.data_dir);
    assert_eq!(config.referee.red_brain, cloned.referee.red_brain);
}
