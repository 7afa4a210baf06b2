//! Exploration strategies for descending the search tree.
//!
//! A strategy scores each child of the node being descended through and
//! estimates the value of a searched position:
//! - `MeanReward`: pure exploitation of the backed-up mean
//! - `Uct`: mean plus an exploration bonus, either UCB1 or PUCT

use serde::{Deserialize, Serialize};

use crate::core::{Actor, PlayerId};
use crate::game::GameState;

use super::node::SearchNode;

/// Scores children during descent.
pub trait ExplorationStrategy<S: GameState>: Send + Sync {
    /// Score of `child` for `player`, who acts at its parent.
    ///
    /// `parent_visits` is the parent's explore count, which already
    /// includes the current simulation.
    fn exploration_score(&self, child: &SearchNode<S>, parent_visits: u32, player: PlayerId) -> f64;

    /// Value of a searched node for the player acting at it.
    fn estimate_value(&self, node: &SearchNode<S>) -> f64 {
        match node.acting_player() {
            Some(Actor::Player(player)) => node.mean_reward(player),
            _ => 0.0,
        }
    }
}

/// Greedy on mean reward. Unvisited children score +inf so each is tried
/// once.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct MeanReward;

impl<S: GameState> ExplorationStrategy<S> for MeanReward {
    fn exploration_score(&self, child: &SearchNode<S>, _parent_visits: u32, player: PlayerId) -> f64 {
        if child.explore_count() == 0 {
            f64::INFINITY
        } else {
            child.mean_reward(player)
        }
    }
}

/// Exploration bonus added to the mean reward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bonus {
    /// UCB1: sqrt(ln(N) / n), +inf for unvisited children.
    Uct,
    /// Prior-weighted: P * sqrt(N) / (n + 1).
    Puct,
}

/// Mean reward plus `c` times an exploration bonus.
///
/// Formula: Q(a) + c * bonus(a)
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Uct {
    /// Exploration constant (default: sqrt(2)).
    pub c: f64,
    pub bonus: Bonus,
}

impl Uct {
    /// Classic UCB1 bonus.
    #[must_use]
    pub fn uct(c: f64) -> Self {
        Self { c, bonus: Bonus::Uct }
    }

    /// Prior-weighted bonus, as used with policy networks.
    #[must_use]
    pub fn puct(c: f64) -> Self {
        Self {
            c,
            bonus: Bonus::Puct,
        }
    }

    /// The bonus term alone, before scaling by `c`.
    #[must_use]
    pub fn bonus_term<S: GameState>(&self, child: &SearchNode<S>, parent_visits: u32) -> f64 {
        let n = child.explore_count() as f64;
        let parent = parent_visits.max(1) as f64;
        match self.bonus {
            Bonus::Uct => {
                if child.explore_count() == 0 {
                    f64::INFINITY
                } else {
                    (parent.ln() / n).sqrt()
                }
            }
            Bonus::Puct => child.prior_probability() * parent.sqrt() / (n + 1.0),
        }
    }
}

impl Default for Uct {
    fn default() -> Self {
        Self::puct(std::f64::consts::SQRT_2)
    }
}

impl<S: GameState> ExplorationStrategy<S> for Uct {
    fn exploration_score(&self, child: &SearchNode<S>, parent_visits: u32, player: PlayerId) -> f64 {
        child.mean_reward(player) + self.c * self.bonus_term(child, parent_visits)
    }
}

impl<S: GameState, T: ExplorationStrategy<S> + ?Sized> ExplorationStrategy<S> for Box<T> {
    fn exploration_score(&self, child: &SearchNode<S>, parent_visits: u32, player: PlayerId) -> f64 {
        (**self).exploration_score(child, parent_visits, player)
    }

    fn estimate_value(&self, node: &SearchNode<S>) -> f64 {
        (**self).estimate_value(node)
    }
}
