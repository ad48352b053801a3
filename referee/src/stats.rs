//! Referee statistics tracking and persistence.
//!
//! This module tracks:
//! - Match counts and outcomes per side
//! - Round counts and how matches ended
//! - Time spent choosing cards
//!
//! Stats are written to `referee_stats.json` after every logged batch and
//! when the run ends.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, warn};

use crate::replay::MatchRecord;
use engine_core::Side;
use games_brave_rats::{Card, RoundOutcome};

/// Aggregated referee statistics, designed for lock-free updates.
#[derive(Debug)]
pub struct RefereeStats {
    /// Number of matches finished
    matches_completed: AtomicU32,
    red_wins: AtomicU32,
    blue_wins: AtomicU32,
    /// Matches that used all eight rounds without a winner
    ties: AtomicU32,
    /// Matches ended by the Princess catching the Prince
    princess_wins: AtomicU32,
    total_rounds: AtomicU64,
    rounds_on_hold: AtomicU64,
    /// Card choices made by either side
    decisions: AtomicU64,
    /// Time spent in brains (microseconds)
    decision_us: AtomicU64,
    /// Start time for rate calculations
    start_time: Instant,
    /// Path to write stats file
    stats_path: String,
    red_brain: String,
    blue_brain: String,
}

/// Serializable stats for JSON output.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefereeStatsSnapshot {
    pub red_brain: String,
    pub blue_brain: String,
    pub matches_completed: u32,
    pub red_wins: u32,
    pub blue_wins: u32,
    pub ties: u32,
    pub princess_wins: u32,
    pub red_win_rate: f64,
    pub avg_rounds: f64,
    pub rounds_on_hold: u64,
    pub avg_decision_us: f64,
    pub matches_per_second: f64,
    pub runtime_seconds: f64,
    pub timestamp: u64,
}

impl RefereeStats {
    /// Create new stats tracker.
    pub fn new(data_dir: &str, red_brain: &str, blue_brain: &str) -> Self {
        let stats_path = format!("{}/referee_stats.json", data_dir);

        // Ensure data directory exists
        if let Err(e) = fs::create_dir_all(data_dir) {
            warn!("Failed to create data directory: {}", e);
        }

        Self {
            matches_completed: AtomicU32::new(0),
            red_wins: AtomicU32::new(0),
            blue_wins: AtomicU32::new(0),
            ties: AtomicU32::new(0),
            princess_wins: AtomicU32::new(0),
            total_rounds: AtomicU64::new(0),
            rounds_on_hold: AtomicU64::new(0),
            decisions: AtomicU64::new(0),
            decision_us: AtomicU64::new(0),
            start_time: Instant::now(),
            stats_path,
            red_brain: red_brain.to_string(),
            blue_brain: blue_brain.to_string(),
        }
    }

    /// Record a finished match. Returns the number of matches completed.
    pub fn record_match(&self, record: &MatchRecord) -> u32 {
        match record.winner {
            Some(Side::Red) => self.red_wins.fetch_add(1, Ordering::Relaxed),
            Some(Side::Blue) => self.blue_wins.fetch_add(1, Ordering::Relaxed),
            None => self.ties.fetch_add(1, Ordering::Relaxed),
        };

        let ended_by_princess = record.rounds.last().is_some_and(|round| {
            matches!(round.outcome, RoundOutcome::MatchWon(side)
                if round.card_of(side) == Card::Princess
                    && round.card_of(side.opponent()) == Card::Prince)
        });
        if ended_by_princess {
            self.princess_wins.fetch_add(1, Ordering::Relaxed);
        }

        let held = record
            .rounds
            .iter()
            .filter(|round| round.outcome == RoundOutcome::OnHold)
            .count();
        self.total_rounds
            .fetch_add(record.rounds.len() as u64, Ordering::Relaxed);
        self.rounds_on_hold.fetch_add(held as u64, Ordering::Relaxed);

        self.matches_completed.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Record time spent by brains choosing cards.
    pub fn record_decisions(&self, decisions: u32, elapsed_us: u64) {
        self.decisions
            .fetch_add(decisions as u64, Ordering::Relaxed);
        self.decision_us.fetch_add(elapsed_us, Ordering::Relaxed);
    }

    /// Get a snapshot of current stats.
    pub fn snapshot(&self) -> RefereeStatsSnapshot {
        let matches = self.matches_completed.load(Ordering::Relaxed);
        let red_wins = self.red_wins.load(Ordering::Relaxed);
        let total_rounds = self.total_rounds.load(Ordering::Relaxed);
        let decisions = self.decisions.load(Ordering::Relaxed);
        let decision_us = self.decision_us.load(Ordering::Relaxed);
        let runtime = self.start_time.elapsed().as_secs_f64();

        let (red_win_rate, avg_rounds) = if matches > 0 {
            (
                red_wins as f64 / matches as f64,
                total_rounds as f64 / matches as f64,
            )
        } else {
            (0.0, 0.0)
        };

        let avg_decision_us = if decisions > 0 {
            decision_us as f64 / decisions as f64
        } else {
            0.0
        };

        let matches_per_second = if runtime > 0.0 {
            matches as f64 / runtime
        } else {
            0.0
        };

        RefereeStatsSnapshot {
            red_brain: self.red_brain.clone(),
            blue_brain: self.blue_brain.clone(),
            matches_completed: matches,
            red_wins,
            blue_wins: self.blue_wins.load(Ordering::Relaxed),
            ties: self.ties.load(Ordering::Relaxed),
            princess_wins: self.princess_wins.load(Ordering::Relaxed),
            red_win_rate,
            avg_rounds,
            rounds_on_hold: self.rounds_on_hold.load(Ordering::Relaxed),
            avg_decision_us,
            matches_per_second,
            runtime_seconds: runtime,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    /// Write stats to JSON file (atomic write-then-rename).
    pub fn write_stats(&self) {
        let snapshot = self.snapshot();

        let json = match serde_json::to_string_pretty(&snapshot) {
            Ok(j) => j,
            Err(e) => {
                warn!("Failed to serialize referee stats: {}", e);
                return;
            }
        };

        // Write to temp file then rename (atomic on most filesystems)
        let temp_path = format!("{}.tmp", self.stats_path);
        match fs::File::create(&temp_path) {
            Ok(mut file) => {
                if let Err(e) = file.write_all(json.as_bytes()) {
                    warn!("Failed to write referee stats: {}", e);
                    return;
                }
            }
            Err(e) => {
                warn!("Failed to create temp stats file: {}", e);
                return;
            }
        }

        if let Err(e) = fs::rename(&temp_path, &self.stats_path) {
            warn!("Failed to rename stats file: {}", e);
            let _ = fs::remove_file(&temp_path);
            return;
        }

        debug!("Wrote referee stats to {}", self.stats_path);
    }

    pub fn stats_path(&self) -> &str {
        &self.stats_path
    }
}
