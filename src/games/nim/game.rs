//! Nim state and rules.

use crate::core::{Actor, PlayerId};
use crate::game::GameState;

/// A single-pile Nim position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Nim {
    sticks: u32,
    max_take: u32,
    to_move: u8,
}

impl Nim {
    /// A pile of `sticks`, removing at most `max_take` per turn, player 0 to move.
    pub fn new(sticks: u32, max_take: u32) -> Self {
        assert!(max_take > 0, "max_take must be at least 1");
        Self {
            sticks,
            max_take,
            to_move: 0,
        }
    }

    #[must_use]
    pub fn sticks(&self) -> u32 {
        self.sticks
    }

    /// Whether the player to move wins with perfect play.
    #[must_use]
    pub fn mover_wins(&self) -> bool {
        self.sticks % (self.max_take + 1) != 0
    }

    /// The winning move for the player to move, if one exists.
    #[must_use]
    pub fn winning_take(&self) -> Option<u32> {
        self.mover_wins().then(|| self.sticks % (self.max_take + 1))
    }
}

impl GameState for Nim {
    type Action = u32;

    fn player_count(&self) -> usize {
        2
    }

    fn current_player(&self) -> Actor {
        Actor::player(self.to_move)
    }

    fn legal_actions(&self) -> Vec<u32> {
        (1..=self.max_take.min(self.sticks)).collect()
    }

    fn is_terminal(&self) -> bool {
        self.sticks == 0
    }

    fn apply(&self, action: &u32) -> Self {
        debug_assert!((1..=self.max_take.min(self.sticks)).contains(action));
        Self {
            sticks: self.sticks - action,
            max_take: self.max_take,
            to_move: 1 - self.to_move,
        }
    }

    fn utility(&self, player: PlayerId) -> f64 {
        // The player who took the last stick is the one not to move.
        if player.0 == self.to_move {
            -1.0
        } else {
            1.0
        }
    }

    fn max_utility(&self) -> f64 {
        1.0
    }
}
