//! Runs matches between two brains and records the results.

use anyhow::{Context, Result};
use engine_core::Side;
use games_brave_rats::{Card, Match};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::brain::{build_brain, Brain, BrainKind};
use crate::config::Config;
use crate::replay::{MatchRecord, ReplayWriter};
use crate::stats::RefereeStats;

/// Cards both sides commit to in a round.
///
/// A side that must reveal first chooses blind and the other side sees its
/// card; otherwise both choose blind.
pub fn play_round(
    game: &Match,
    red: &mut dyn Brain,
    blue: &mut dyn Brain,
) -> Result<(Card, Card)> {
    let status = game.status();
    let red_player = game.player(Side::Red);
    let blue_player = game.player(Side::Blue);

    let cards = match game.reveals_first() {
        Some(Side::Red) => {
            let red_card = red.choose_card(red_player, status, None)?;
            let blue_card = blue.choose_card(blue_player, status, Some(red_card))?;
            (red_card, blue_card)
        }
        Some(Side::Blue) => {
            let blue_card = blue.choose_card(blue_player, status, None)?;
            let red_card = red.choose_card(red_player, status, Some(blue_card))?;
            (red_card, blue_card)
        }
        None => (
            red.choose_card(red_player, status, None)?,
            blue.choose_card(blue_player, status, None)?,
        ),
    };
    Ok(cards)
}

/// Play one full match.
///
/// Returns the record and the number of card choices made.
pub fn play_match(
    match_id: u32,
    red: &mut dyn Brain,
    blue: &mut dyn Brain,
) -> Result<(MatchRecord, u32)> {
    let start = Instant::now();
    let mut game = Match::new();
    let mut decisions = 0;

    while !game.is_over() {
        let round = game.status().round_count() + 1;
        let (red_card, blue_card) = play_round(&game, red, blue)
            .with_context(|| format!("match {match_id}, round {round}"))?;
        decisions += 2;
        game.play(red_card, blue_card)?;
    }

    let record = MatchRecord::from_status(
        match_id,
        red.name(),
        blue.name(),
        game.status(),
        start.elapsed().as_millis() as u64,
    );
    debug!(
        match_id,
        rounds = record.rounds.len(),
        score = %game.status().score_summary(),
        "Match finished"
    );
    Ok((record, decisions))
}

/// Brain seeds for a match, derived from the base seed.
fn match_seeds(base: Option<u64>, match_id: u32) -> [Option<u64>; 2] {
    let offset = 2 * match_id as u64;
    [
        base.map(|seed| seed.wrapping_add(offset)),
        base.map(|seed| seed.wrapping_add(offset + 1)),
    ]
}

/// A finished match with its decision count and wall time in microseconds.
type MatchOutcome = Result<(MatchRecord, u32, u64)>;

pub struct Referee {
    config: Config,
    brains: [BrainKind; 2],
    stats: RefereeStats,
    shutdown_signal: AtomicBool,
}

impl Referee {
    pub fn new(config: Config) -> Result<Self> {
        let brains = [config.brain(Side::Red)?, config.brain(Side::Blue)?];
        let stats = RefereeStats::new(&config.data_dir, brains[0].name(), brains[1].name());

        info!(
            red = brains[0].name(),
            blue = brains[1].name(),
            red_iterations = config.uct_config(Side::Red)?.iterations,
            blue_iterations = config.uct_config(Side::Blue)?.iterations,
            "Referee initialized"
        );

        Ok(Self {
            config,
            brains,
            stats,
            shutdown_signal: AtomicBool::new(false),
        })
    }

    pub fn stats(&self) -> &RefereeStats {
        &self.stats
    }

    pub fn shutdown(&self) {
        self.shutdown_signal.store(true, Ordering::Relaxed);
        info!("Shutdown signal set");
    }

    fn is_shutting_down(&self) -> bool {
        self.shutdown_signal.load(Ordering::Relaxed)
    }

    /// Start match `match_id` on the blocking pool.
    fn spawn_match(&self, tasks: &mut JoinSet<MatchOutcome>, match_id: u32) -> Result<()> {
        let [red_seed, blue_seed] = match_seeds(self.config.seed, match_id);
        let mut red = build_brain(self.brains[0], self.config.uct_config(Side::Red)?, red_seed);
        let mut blue = build_brain(self.brains[1], self.config.uct_config(Side::Blue)?, blue_seed);

        tasks.spawn_blocking(move || {
            let start = Instant::now();
            let (record, decisions) = play_match(match_id, red.as_mut(), blue.as_mut())?;
            Ok((record, decisions, start.elapsed().as_micros() as u64))
        });
        Ok(())
    }

    pub async fn run(&self) -> Result<()> {
        let total = self.config.matches;
        info!(
            matches = total,
            concurrency = self.config.concurrency,
            seed = ?self.config.seed,
            "Referee starting"
        );

        let mut replay = ReplayWriter::open(&self.config.replay_path())?;

        // Progress bar only when stderr is a TTY
        let progress = if total > 0 && std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} matches ({eta})")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut tasks = JoinSet::new();
        let mut next_match = 0;
        let mut failures = 0u32;

        loop {
            while next_match < total
                && tasks.len() < self.config.concurrency
                && !self.is_shutting_down()
            {
                self.spawn_match(&mut tasks, next_match)?;
                next_match += 1;
            }

            let Some(joined) = tasks.join_next().await else {
                break;
            };

            let (record, decisions, elapsed_us) = match joined.context("match task panicked")? {
                Ok(result) => result,
                Err(e) => {
                    failures += 1;
                    error!("Match failed: {:#}", e);
                    continue;
                }
            };

            replay.append(&record)?;
            self.stats.record_decisions(decisions, elapsed_us);
            let completed = self.stats.record_match(&record);

            if let Some(ref pb) = progress {
                pb.inc(1);
            }

            if self.config.log_interval > 0 && completed % self.config.log_interval == 0 {
                let snapshot = self.stats.snapshot();
                let log = || {
                    info!(
                        completed,
                        red_wins = snapshot.red_wins,
                        blue_wins = snapshot.blue_wins,
                        ties = snapshot.ties,
                        avg_rounds = format!("{:.2}", snapshot.avg_rounds),
                        "Completed {} matches",
                        completed
                    );
                };
                // Suspend progress bar while logging to avoid visual glitches
                match progress {
                    Some(ref pb) => pb.suspend(log),
                    None => log(),
                }
                self.stats.write_stats();
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("done");
        }
        if self.is_shutting_down() && next_match < total {
            info!(
                played = next_match,
                skipped = total - next_match,
                "Stopped early on shutdown"
            );
        }

        self.stats.write_stats();
        let snapshot = self.stats.snapshot();
        info!(
            matches = snapshot.matches_completed,
            red_wins = snapshot.red_wins,
            blue_wins = snapshot.blue_wins,
            ties = snapshot.ties,
            princess_wins = snapshot.princess_wins,
            red_win_rate = format!("{:.3}", snapshot.red_win_rate),
            failures,
            records = replay.written(),
            "Referee finished"
        );
        Ok(())
    }
}
