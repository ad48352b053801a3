//! UCT search configuration parameters.

/// What the search does when asked to run zero iterations.
///
/// With no iterations the root has no children and there is nothing to rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroBudgetPolicy {
    /// Return [`SearchError::InsufficientSearch`](crate::SearchError::InsufficientSearch).
    #[default]
    Fail,
    /// Return a uniformly random legal move from the root.
    RandomMove,
}

impl ZeroBudgetPolicy {
    /// Parse the configuration spelling (`"fail"` or `"random"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fail" => Some(Self::Fail),
            "random" | "random_move" => Some(Self::RandomMove),
            _ => None,
        }
    }
}

/// Configuration for UCT search.
#[derive(Debug, Clone)]
pub struct UctConfig {
    /// Number of select/expand/simulate/backpropagate iterations per search.
    pub iterations: u32,

    /// Multiplier on the UCB1 exploration term
    /// `sqrt(2 * ln(N_parent) / N_child)`.
    /// 1.0 is plain UCB1; lower values favour exploitation.
    pub exploration: f32,

    /// Behaviour when `iterations` is zero.
    pub zero_budget: ZeroBudgetPolicy,

    /// Safety cap on plies per rollout. `None` plays until the game ends.
    pub max_rollout_plies: Option<u32>,

    /// Log the root's children after each search at debug level and the full
    /// tree at trace level.
    pub verbose: bool,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration: 1.0,
            zero_budget: ZeroBudgetPolicy::Fail,
            max_rollout_plies: None,
            verbose: false,
        }
    }
}

impl UctConfig {
    /// Create config for match play.
    pub fn for_play() -> Self {
        Self::default()
    }

    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 200,
            exploration: 1.0,
            zero_budget: ZeroBudgetPolicy::Fail,
            max_rollout_plies: Some(64),
            verbose: false,
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set exploration constant.
    pub fn with_exploration(mut self, c: f32) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set zero-budget policy.
    pub fn with_zero_budget(mut self, policy: ZeroBudgetPolicy) -> Self {
        self.zero_budget = policy;
        self
    }

    /// Builder pattern: cap rollout length (0 removes the cap).
    pub fn with_max_rollout_plies(mut self, plies: u32) -> Self {
        self.max_rollout_plies = (plies > 0).then_some(plies);
        self
    }

    /// Builder pattern: toggle tree logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UctConfig::default();
        assert_eq!(config.iterations, 1000);
        assert!((config.exploration - 1.0).abs() < 1e-6);
        assert_eq!(config.zero_budget, ZeroBudgetPolicy::Fail);
        assert!(config.max_rollout_plies.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = UctConfig::default()
            .with_iterations(100)
            .with_exploration(0.5)
            .with_zero_budget(ZeroBudgetPolicy::RandomMove);

        assert_eq!(config.iterations, 100);
        assert!((config.exploration - 0.5).abs() < 1e-6);
        assert_eq!(config.zero_budget, ZeroBudgetPolicy::RandomMove);
    }

    #[test]
    fn test_rollout_cap_zero_means_unbounded() {
        let config = UctConfig::for_testing().with_max_rollout_plies(0);
        assert!(config.max_rollout_plies.is_none());

        let config = config.with_max_rollout_plies(12);
        assert_eq!(config.max_rollout_plies, Some(12));
    }

    #[test]
    fn test_zero_budget_policy_names() {
        assert_eq!(ZeroBudgetPolicy::from_name("fail"), Some(ZeroBudgetPolicy::Fail));
        assert_eq!(
            ZeroBudgetPolicy::from_name(" Random "),
            Some(ZeroBudgetPolicy::RandomMove)
        );
        assert_eq!(ZeroBudgetPolicy::from_name("panic"), None);
    }
}
