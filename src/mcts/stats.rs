//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one `build_tree` call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Simulations run from the root.
    pub simulations: u32,

    /// Nodes evaluated and expanded, the root included.
    pub nodes_expanded: u32,

    /// Simulations that ended on a terminal state.
    pub terminal_visits: u32,

    /// Maximum depth reached during search.
    pub max_depth: u16,

    /// Whether the root's outcome was known when the search ended.
    pub root_solved: bool,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate simulations per second.
    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.simulations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Fraction of simulations that reached a terminal state.
    #[must_use]
    pub fn terminal_ratio(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.terminal_visits as f64 / self.simulations as f64
        }
    }
}
