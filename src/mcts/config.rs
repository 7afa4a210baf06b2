//! Search configuration parameters.

use serde::{Deserialize, Serialize};

use super::noise::DirichletNoise;

/// How a leaf evaluation's value is turned into a backed-up reward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueBackup {
    /// Back up the estimate's mean.
    #[default]
    Mean,
    /// Back up one draw from the estimate's distribution.
    Sample,
}

/// Tree search parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchParams {
    /// Simulations per `build_tree` call (default: 100).
    pub num_simulations: u32,

    /// Dirichlet noise mixed into the root prior (default: none).
    pub noise: Option<DirichletNoise>,

    /// Random seed for the search RNG.
    /// Same seed produces deterministic searches.
    pub seed: u64,

    /// Maximum nodes to allocate in the tree (0 = unlimited).
    /// Prevents memory exhaustion on large searches.
    pub max_nodes: usize,

    /// End the search early once the root's outcome is known.
    pub stop_when_solved: bool,

    /// How leaf values are backed up.
    pub value_backup: ValueBackup,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            num_simulations: 100,
            noise: None,
            seed: 42,
            max_nodes: 0,
            stop_when_solved: false,
            value_backup: ValueBackup::Mean,
        }
    }
}

impl SearchParams {
    /// Create params with a custom simulation count.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Create params with root noise.
    pub fn with_noise(mut self, noise: DirichletNoise) -> Self {
        self.noise = Some(noise);
        self
    }

    /// Create params with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create params with a node limit.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Create params that stop once the root is solved.
    pub fn with_stop_when_solved(mut self, stop: bool) -> Self {
        self.stop_when_solved = stop;
        self
    }

    /// Create params with a value backup mode.
    pub fn with_value_backup(mut self, backup: ValueBackup) -> Self {
        self.value_backup = backup;
        self
    }
}
