//! UCT search implementation.
//!
//! Implements the core UCT algorithm:
//! 1. Selection: descend fully expanded nodes by UCB1
//! 2. Expansion: add one child for a random untried move
//! 3. Simulation: play random moves to the end of the game
//! 4. Backpropagation: credit each node on the path with the result for the
//!    side that moved into it

use std::time::{Duration, Instant};

use engine_core::GameState;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{UctConfig, ZeroBudgetPolicy};
use crate::rollout::{RandomRollout, Rollout};
use crate::tree::UctTree;

/// Errors that can occur during UCT search.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("No legal moves available: the root position is already terminal")]
    NoLegalMoves,

    #[error("Search ran zero iterations and no fallback policy is configured")]
    InsufficientSearch,
}

/// Performance figures for one search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    /// Nodes in the tree when the search finished
    pub nodes: usize,
    /// Deepest expanded node
    pub max_depth: usize,
    /// Moves played across all rollouts
    pub rollout_plies: u64,
    /// Wall-clock time spent in `run`
    pub elapsed: Duration,
}

/// Result of a UCT search.
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    /// Move of the most visited root child
    pub best_move: M,

    /// Visits of the chosen child (0 for a zero-budget fallback)
    pub visits: u32,

    /// Mean result of the chosen child for the side to move at the root
    pub mean_score: f32,

    /// Visits recorded at the root
    pub iterations: u32,

    /// (move, visits, mean score) for each root child, in expansion order
    pub children: Vec<(M, u32, f32)>,

    pub stats: SearchStats,
}

/// UCT search state.
pub struct UctSearch<'a, S: GameState, R: Rollout<S>> {
    tree: UctTree<S::Move>,
    root_state: S,
    rollout: &'a R,
    config: UctConfig,
    rollout_plies: u64,
}

impl<'a, S: GameState, R: Rollout<S>> UctSearch<'a, S, R> {
    /// Create a new search rooted at `root_state`.
    ///
    /// Fails with [`SearchError::NoLegalMoves`] when the root is terminal or
    /// the side to move has nothing to play; no tree is built in that case.
    pub fn new(root_state: S, rollout: &'a R, config: UctConfig) -> Result<Self, SearchError> {
        if root_state.is_terminal() {
            return Err(SearchError::NoLegalMoves);
        }
        let moves = root_state.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let tree = UctTree::new(moves, root_state.player_just_moved());

        Ok(Self {
            tree,
            root_state,
            rollout,
            config,
            rollout_plies: 0,
        })
    }

    /// Run the search for the configured number of iterations.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult<S::Move>, SearchError> {
        let start = Instant::now();

        for _ in 0..self.config.iterations {
            self.iterate(rng);
        }

        let tree_stats = self.tree.stats();
        let stats = SearchStats {
            nodes: tree_stats.nodes,
            max_depth: tree_stats.max_depth,
            rollout_plies: self.rollout_plies,
            elapsed: start.elapsed(),
        };
        let children = self.tree.children_summary();

        if self.config.verbose {
            for (mv, visits, mean) in &children {
                debug!(mv = ?mv, visits, mean, "Root child");
            }
            trace!("Search tree:\n{}", self.tree.render(2));
        }

        let result = match self.tree.best_move() {
            Some((mv, visits)) => {
                let mean_score = children
                    .iter()
                    .find(|(m, _, _)| m == mv)
                    .map(|(_, _, mean)| *mean)
                    .unwrap_or(0.0);
                SearchResult {
                    best_move: mv.clone(),
                    visits,
                    mean_score,
                    iterations: tree_stats.root_visits,
                    children,
                    stats,
                }
            }
            None => self.zero_budget_fallback(rng, stats)?,
        };

        debug!(
            iterations = result.iterations,
            nodes = stats.nodes,
            max_depth = stats.max_depth,
            best = ?result.best_move,
            visits = result.visits,
            mean = result.mean_score,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "UCT search complete"
        );

        Ok(result)
    }

    /// Run one select -> expand -> simulate -> backpropagate pass.
    fn iterate(&mut self, rng: &mut ChaCha20Rng) {
        let mut node_id = self.tree.root();
        let mut state = self.root_state.clone();

        // Selection: descend while fully expanded and not terminal
        loop {
            let node = self.tree.get(node_id);
            if !node.is_fully_expanded() || !node.has_children() || state.is_terminal() {
                break;
            }
            let Some(child_id) = self.tree.select_child(node_id, self.config.exploration) else {
                break;
            };
            node_id = child_id;
            if let Some(mv) = &self.tree.get(child_id).mv {
                state.apply(mv);
            }
        }

        // Expansion: one random untried move
        if !state.is_terminal() {
            if let Some(mv) = self.tree.get(node_id).untried.choose(rng).cloned() {
                state.apply(&mv);
                let untried = if state.is_terminal() {
                    Vec::new()
                } else {
                    state.legal_moves()
                };
                node_id = self
                    .tree
                    .add_child(node_id, mv, untried, state.player_just_moved());
            }
        }

        // Simulation
        let plies = self
            .rollout
            .play_out(&mut state, self.config.max_rollout_plies, rng);
        self.rollout_plies += plies as u64;

        // Backpropagation
        self.tree.backpropagate(node_id, |side| state.result(side));

        trace!(leaf = node_id.0, plies, "UCT iteration complete");
    }

    fn zero_budget_fallback(
        &self,
        rng: &mut ChaCha20Rng,
        stats: SearchStats,
    ) -> Result<SearchResult<S::Move>, SearchError> {
        match self.config.zero_budget {
            ZeroBudgetPolicy::Fail => Err(SearchError::InsufficientSearch),
            ZeroBudgetPolicy::RandomMove => {
                let best_move = self
                    .tree
                    .get(self.tree.root())
                    .untried
                    .choose(rng)
                    .cloned()
                    .ok_or(SearchError::NoLegalMoves)?;
                debug!(mv = ?best_move, "Zero-iteration search, falling back to a random move");
                Ok(SearchResult {
                    best_move,
                    visits: 0,
                    mean_score: 0.0,
                    iterations: 0,
                    children: Vec::new(),
                    stats,
                })
            }
        }
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &UctTree<S::Move> {
        &self.tree
    }

    /// The position the search is rooted at.
    pub fn root_state(&self) -> &S {
        &self.root_state
    }
}

/// Convenience function to run a single UCT search with random rollouts.
pub fn run_uct<S: GameState>(
    root_state: S,
    config: UctConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<S::Move>, SearchError> {
    let rollout = RandomRollout;
    let mut search = UctSearch::new(root_state, &rollout, config)?;
    search.run(rng)
}
