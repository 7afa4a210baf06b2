//! Small games and reference solvers shared by the integration tests.

#![allow(dead_code)]

use rust_mcts::core::{Actor, PlayerId, Result};
use rust_mcts::eval::{uniform_prior, ActionProbabilities, Evaluation, Evaluator};
use rust_mcts::game::GameState;

// =============================================================================
// Single player, one legal move per turn
// =============================================================================

/// A one-player game where every turn has exactly one legal move.
#[derive(Clone, Debug)]
pub struct OnlyMove {
    pub remaining: u32,
}

impl GameState for OnlyMove {
    type Action = ();

    fn player_count(&self) -> usize {
        1
    }

    fn current_player(&self) -> Actor {
        Actor::player(0)
    }

    fn legal_actions(&self) -> Vec<()> {
        if self.remaining == 0 {
            Vec::new()
        } else {
            vec![()]
        }
    }

    fn is_terminal(&self) -> bool {
        self.remaining == 0
    }

    fn apply(&self, _action: &()) -> Self {
        Self {
            remaining: self.remaining - 1,
        }
    }

    fn utility(&self, _player: PlayerId) -> f64 {
        1.0
    }

    fn max_utility(&self) -> f64 {
        1.0
    }
}

// =============================================================================
// Chance: bet on a biased coin
// =============================================================================

pub const HEADS_PROBABILITY: f64 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Coin {
    Heads,
    Tails,
}

/// Player 0 calls a side, then chance flips a coin landing heads 70% of
/// the time. A correct call scores +1 for player 0 and -1 for player 1.
#[derive(Clone, Debug)]
pub struct CoinBet {
    pub call: Option<Coin>,
    pub flip: Option<Coin>,
}

impl CoinBet {
    pub fn new() -> Self {
        Self {
            call: None,
            flip: None,
        }
    }

    /// The coin's distribution, for evaluators of chance states.
    pub fn flip_probabilities() -> ActionProbabilities<Coin> {
        let mut probs = ActionProbabilities::default();
        probs.insert(Coin::Heads, HEADS_PROBABILITY);
        probs.insert(Coin::Tails, 1.0 - HEADS_PROBABILITY);
        probs
    }
}

impl GameState for CoinBet {
    type Action = Coin;

    fn player_count(&self) -> usize {
        2
    }

    fn current_player(&self) -> Actor {
        if self.call.is_none() {
            Actor::player(0)
        } else {
            Actor::Chance
        }
    }

    fn legal_actions(&self) -> Vec<Coin> {
        if self.is_terminal() {
            Vec::new()
        } else {
            vec![Coin::Heads, Coin::Tails]
        }
    }

    fn is_terminal(&self) -> bool {
        self.flip.is_some()
    }

    fn apply(&self, action: &Coin) -> Self {
        match self.call {
            None => Self {
                call: Some(*action),
                flip: None,
            },
            Some(call) => Self {
                call: Some(call),
                flip: Some(*action),
            },
        }
    }

    fn utility(&self, player: PlayerId) -> f64 {
        let won = self.call == self.flip;
        match (player.0, won) {
            (0, true) | (1, false) => 1.0,
            _ => -1.0,
        }
    }

    fn max_utility(&self) -> f64 {
        1.0
    }
}

/// Uniform prior for players, the coin's true odds for chance.
#[derive(Clone, Debug, Default)]
pub struct CoinEvaluator;

impl Evaluator<CoinBet> for CoinEvaluator {
    fn evaluate(&mut self, state: &CoinBet) -> Result<Evaluation<Coin>> {
        let prior = match state.current_player() {
            Actor::Chance => CoinBet::flip_probabilities(),
            Actor::Player(_) => uniform_prior(&state.legal_actions()),
        };
        Ok(Evaluation::new(prior, 0.0))
    }
}

// =============================================================================
// Three-player Nim
// =============================================================================

/// Nim with three players taking turns. Taking the last stick scores +1,
/// the two others -0.5 each.
#[derive(Clone, Debug)]
pub struct ThreeNim {
    pub sticks: u32,
    pub to_move: u8,
}

impl ThreeNim {
    pub fn new(sticks: u32) -> Self {
        Self { sticks, to_move: 0 }
    }
}

impl GameState for ThreeNim {
    type Action = u32;

    fn player_count(&self) -> usize {
        3
    }

    fn current_player(&self) -> Actor {
        Actor::player(self.to_move)
    }

    fn legal_actions(&self) -> Vec<u32> {
        (1..=2.min(self.sticks)).collect()
    }

    fn is_terminal(&self) -> bool {
        self.sticks == 0
    }

    fn apply(&self, action: &u32) -> Self {
        Self {
            sticks: self.sticks - action,
            to_move: (self.to_move + 1) % 3,
        }
    }

    fn utility(&self, player: PlayerId) -> f64 {
        // The player who moved last is the one before `to_move`.
        let last = (self.to_move + 2) % 3;
        if player.0 == last {
            1.0
        } else {
            -0.5
        }
    }

    fn max_utility(&self) -> f64 {
        1.0
    }
}

// =============================================================================
// Reference solver
// =============================================================================

/// Exhaustive negamax value of a two-player zero-sum state, for the player
/// to move.
pub fn negamax<S: GameState>(state: &S) -> f64 {
    let Actor::Player(player) = state.current_player() else {
        panic!("negamax only handles player nodes");
    };
    if state.is_terminal() {
        return state.utility(player);
    }
    state
        .legal_actions()
        .iter()
        .map(|action| {
            let next = state.apply(action);
            if next.is_terminal() {
                next.utility(player)
            } else if next.current_player() == Actor::Player(player) {
                negamax(&next)
            } else {
                -negamax(&next)
            }
        })
        .fold(f64::NEG_INFINITY, f64::max)
}
