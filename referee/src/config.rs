//! Configuration for the referee
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use engine_core::Side;
use mcts::{UctConfig, ZeroBudgetPolicy};
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

use crate::brain::BrainKind;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_matches() -> u32 {
    CENTRAL_CONFIG.referee.matches
}

fn default_red_brain() -> String {
    CENTRAL_CONFIG.referee.red_brain.clone()
}

fn default_blue_brain() -> String {
    CENTRAL_CONFIG.referee.blue_brain.clone()
}

fn default_iterations() -> u32 {
    CENTRAL_CONFIG.search.iterations
}

fn default_exploration() -> f32 {
    CENTRAL_CONFIG.search.exploration
}

fn default_zero_budget() -> String {
    CENTRAL_CONFIG.search.zero_budget.clone()
}

fn default_max_rollout_plies() -> u32 {
    CENTRAL_CONFIG.search.max_rollout_plies
}

fn default_concurrency() -> usize {
    CENTRAL_CONFIG.referee.concurrency
}

fn default_data_dir() -> String {
    CENTRAL_CONFIG.common.data_dir.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.referee.log_interval
}

fn default_verbose_search() -> bool {
    CENTRAL_CONFIG.search.verbose
}

#[derive(Parser, Debug, Clone)]
#[command(name = "referee")]
#[command(about = "Brave Rats referee - plays matches between two brains")]
#[command(
    long_about = "Referee that plays Brave Rats matches between two brains, one per side,
and records every match to matches.jsonl along with running statistics.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Number of matches to play
    #[arg(long, default_value_t = default_matches())]
    pub matches: u32,

    /// Brain playing red (uct, random)
    #[arg(long, default_value_t = default_red_brain())]
    pub red_brain: String,

    /// Brain playing blue (uct, random)
    #[arg(long, default_value_t = default_blue_brain())]
    pub blue_brain: String,

    /// UCT iterations per decision for both sides
    #[arg(long, default_value_t = default_iterations())]
    pub iterations: u32,

    /// UCT iterations for red, overriding --iterations
    #[arg(long)]
    pub red_iterations: Option<u32>,

    /// UCT iterations for blue, overriding --iterations
    #[arg(long)]
    pub blue_iterations: Option<u32>,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f32,

    /// Behaviour with a zero iteration budget (fail, random)
    #[arg(long, default_value_t = default_zero_budget())]
    pub zero_budget: String,

    /// Cap on rollout length in plies (0 for none)
    #[arg(long, default_value_t = default_max_rollout_plies())]
    pub max_rollout_plies: u32,

    /// Base seed for every brain; unset seeds from entropy
    #[arg(long)]
    pub seed: Option<u64>,

    /// Matches played at the same time
    #[arg(long, default_value_t = default_concurrency())]
    pub concurrency: usize,

    /// Directory for referee_stats.json and matches.jsonl
    #[arg(long, default_value_t = default_data_dir())]
    pub data_dir: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Log progress every N matches (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,

    /// Log root statistics and the top of the tree after every search
    #[arg(long, default_value_t = default_verbose_search())]
    pub verbose_search: bool,
}

impl Config {
    /// Fill settings clap leaves unset from config.toml.
    pub fn with_central_fallbacks(mut self) -> Self {
        self.red_iterations = self.red_iterations.or(CENTRAL_CONFIG.referee.red_iterations);
        self.blue_iterations = self.blue_iterations.or(CENTRAL_CONFIG.referee.blue_iterations);
        self.seed = self.seed.or(CENTRAL_CONFIG.referee.seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.brain(Side::Red)?;
        self.brain(Side::Blue)?;
        self.zero_budget_policy()?;

        if self.concurrency == 0 {
            return Err(anyhow!("concurrency must be greater than 0"));
        }

        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!(
                "exploration must be a non-negative number, got {}",
                self.exploration
            ));
        }

        if self.data_dir.is_empty() {
            return Err(anyhow!("data_dir cannot be empty"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn brain(&self, side: Side) -> Result<BrainKind> {
        let name = match side {
            Side::Red => &self.red_brain,
            Side::Blue => &self.blue_brain,
        };
        BrainKind::from_name(name)
            .ok_or_else(|| anyhow!("unknown {side} brain '{name}', expected uct or random"))
    }

    pub fn zero_budget_policy(&self) -> Result<ZeroBudgetPolicy> {
        ZeroBudgetPolicy::from_name(&self.zero_budget).ok_or_else(|| {
            anyhow!(
                "invalid zero_budget '{}', expected fail or random",
                self.zero_budget
            )
        })
    }

    /// Search settings for `side`'s brain.
    pub fn uct_config(&self, side: Side) -> Result<UctConfig> {
        let iterations = match side {
            Side::Red => self.red_iterations,
            Side::Blue => self.blue_iterations,
        }
        .unwrap_or(self.iterations);

        Ok(UctConfig::for_play()
            .with_iterations(iterations)
            .with_exploration(self.exploration)
            .with_zero_budget(self.zero_budget_policy()?)
            .with_max_rollout_plies(self.max_rollout_plies)
            .with_verbose(self.verbose_search))
    }

    pub fn stats_path(&self) -> String {
        format!("{}/referee_stats.json", self.data_dir)
    }

    pub fn replay_path(&self) -> String {
        format!("{}/matches.jsonl", self.data_dir)
    }
}
