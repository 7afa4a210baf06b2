//! Reference evaluators.
//!
//! These need nothing but the game rules, which makes them the baselines
//! for testing the search and for games without a trained model.

use crate::core::{Actor, PlayerId, Result, SearchRng};
use crate::game::GameState;

use super::evaluation::{uniform_prior, ActionProbabilities, Evaluation, Evaluator};

/// Uniform prior over legal actions and a neutral value of 0.
#[derive(Clone, Debug, Default)]
pub struct RandomEvaluator;

impl RandomEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl<S: GameState> Evaluator<S> for RandomEvaluator {
    fn evaluate(&mut self, state: &S) -> Result<Evaluation<S::Action>> {
        Ok(Evaluation::new(uniform_prior(&state.legal_actions()), 0.0))
    }
}

/// Uniform prior, with the value estimated by random playouts.
///
/// Plays `num_rollouts` uniformly random games to the end and averages the
/// acting player's utility. Playouts longer than `max_depth` moves (0 =
/// unlimited) are scored 0. States where chance acts are valued 0, as the
/// value has no player to belong to.
#[derive(Clone, Debug)]
pub struct RandomRolloutEvaluator {
    num_rollouts: u32,
    max_depth: u32,
    rng: SearchRng,
}

impl RandomRolloutEvaluator {
    pub fn new(num_rollouts: u32, rng: SearchRng) -> Self {
        Self {
            num_rollouts: num_rollouts.max(1),
            max_depth: 0,
            rng,
        }
    }

    /// Cap playout length.
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    fn rollout<S: GameState>(&mut self, state: &S, player: PlayerId) -> f64 {
        let mut scratch = state.clone();
        let mut depth = 0;

        while !scratch.is_terminal() {
            if self.max_depth > 0 && depth >= self.max_depth {
                return 0.0;
            }
            let actions = scratch.legal_actions();
            let Some(action) = self.rng.choose(&actions) else {
                return 0.0;
            };
            scratch = scratch.apply(action);
            depth += 1;
        }

        scratch.utility(player)
    }
}

impl Default for RandomRolloutEvaluator {
    fn default() -> Self {
        Self::new(100, SearchRng::new(42))
    }
}

impl<S: GameState> Evaluator<S> for RandomRolloutEvaluator {
    fn evaluate(&mut self, state: &S) -> Result<Evaluation<S::Action>> {
        let prior = uniform_prior(&state.legal_actions());

        let value = match state.current_player() {
            Actor::Chance => 0.0,
            Actor::Player(player) => {
                let total: f64 = (0..self.num_rollouts)
                    .map(|_| self.rollout(state, player))
                    .sum();
                total / self.num_rollouts as f64
            }
        };

        Ok(Evaluation::new(prior, value))
    }
}

/// Puts all prior mass on the first legal action; value 0.
///
/// Makes the search a deterministic line-follower, handy for tests.
#[derive(Clone, Debug, Default)]
pub struct FirstActionEvaluator;

impl<S: GameState> Evaluator<S> for FirstActionEvaluator {
    fn evaluate(&mut self, state: &S) -> Result<Evaluation<S::Action>> {
        let prior: ActionProbabilities<S::Action> = state
            .legal_actions()
            .into_iter()
            .take(1)
            .map(|a| (a, 1.0))
            .collect();
        Ok(Evaluation::new(prior, 0.0))
    }
}
