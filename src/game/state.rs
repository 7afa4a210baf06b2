//! Game state trait consumed by the search.
//!
//! Games implement `GameState` to define:
//! - Who acts and which actions are legal
//! - How an action produces the next state
//! - When the game ends and what each player receives

use std::fmt::Debug;
use std::hash::Hash;

use crate::core::{Actor, PlayerId, PlayerMap};

/// A game position with value semantics.
///
/// The search never mutates a state in place: every transition goes through
/// [`GameState::apply`], and nodes cache the state they were reached with.
///
/// ## Implementation Notes
///
/// - `apply`: only called with an action from `legal_actions` on a
///   nonterminal state; must be deterministic
/// - `utility`: only meaningful once `is_terminal` returns true
/// - `max_utility`: an upper bound on any player's utility reachable from
///   this state; the solver stops scanning children once one achieves it
pub trait GameState: Clone + Debug {
    /// A move. Must be hashable so priors and visit distributions can be
    /// keyed by it.
    type Action: Clone + Eq + Hash + Debug;

    /// Number of players (excluding chance).
    fn player_count(&self) -> usize;

    /// The party to act.
    fn current_player(&self) -> Actor;

    /// Legal actions for the party to act. Empty only when terminal.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Whether the game is over.
    fn is_terminal(&self) -> bool;

    /// The state reached by playing `action`.
    fn apply(&self, action: &Self::Action) -> Self;

    /// Utility of a terminal state for `player`.
    fn utility(&self, player: PlayerId) -> f64;

    /// Upper bound on the utility any player can achieve from here.
    fn max_utility(&self) -> f64;

    // === Convenience Methods ===

    /// Utilities for every player, in player order.
    fn utilities(&self) -> PlayerMap<f64> {
        PlayerMap::new(self.player_count(), |player| self.utility(player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two players alternately add 1 or 2; reaching 3 ends the game and the
    /// player who reached it scores 1.
    #[derive(Clone, Debug)]
    struct RaceToThree {
        total: u8,
        to_move: u8,
    }

    impl GameState for RaceToThree {
        type Action = u8;

        fn player_count(&self) -> usize {
            2
        }

        fn current_player(&self) -> Actor {
            Actor::player(self.to_move)
        }

        fn legal_actions(&self) -> Vec<u8> {
            if self.is_terminal() {
                vec![]
            } else {
                (1..=2).filter(|a| self.total + a <= 3).collect()
            }
        }

        fn is_terminal(&self) -> bool {
            self.total >= 3
        }

        fn apply(&self, action: &u8) -> Self {
            Self {
                total: self.total + action,
                to_move: 1 - self.to_move,
            }
        }

        fn utility(&self, player: PlayerId) -> f64 {
            // The player who just moved reached 3.
            if player.0 != self.to_move {
                1.0
            } else {
                -1.0
            }
        }

        fn max_utility(&self) -> f64 {
            1.0
        }
    }

    #[test]
    fn test_utilities_default() {
        let state = RaceToThree { total: 1, to_move: 0 }.apply(&2);

        assert!(state.is_terminal());
        assert_eq!(state.utilities().as_slice(), &[1.0, -1.0]);
    }

    #[test]
    fn test_legal_actions_shrink_near_end() {
        let state = RaceToThree { total: 2, to_move: 1 };
        assert_eq!(state.legal_actions(), vec![1]);
        assert_eq!(state.current_player(), Actor::player(1));
    }
}
