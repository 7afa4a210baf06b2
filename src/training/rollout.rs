//! Per-game record of search output for training.
//!
//! A rollout records a complete game played with a search policy,
//! capturing at each decision point:
//! - The state the decision was made in
//! - The evaluation the policy produced (visit distribution + value)
//! - The acting player
//!
//! Outcomes are filled in from the final state's utilities once the game
//! ends, giving every step a value target.

use crate::core::{PlayerId, Result};
use crate::eval::{Evaluation, Evaluator};
use crate::game::GameState;

/// States, evaluations and players of one game, with outcomes once
/// finished.
#[derive(Debug)]
pub struct GameRolloutData<S: GameState> {
    pub states: Vec<S>,
    pub evaluations: Vec<Evaluation<S::Action>>,
    pub player_ids: Vec<PlayerId>,

    /// Final utility for the player of each step. Empty until `finish`.
    pub outcomes: Vec<f64>,
}

impl<S: GameState> GameRolloutData<S> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            evaluations: Vec::new(),
            player_ids: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    /// Record a decision.
    ///
    /// Returns false and records nothing when chance acts at `state`, as
    /// such steps have no player to train for.
    pub fn record(&mut self, state: S, evaluation: Evaluation<S::Action>) -> bool {
        let Some(player) = state.current_player().player_id() else {
            return false;
        };
        self.states.push(state);
        self.evaluations.push(evaluation);
        self.player_ids.push(player);
        true
    }

    /// Fill in each step's outcome from the final state.
    pub fn finish(&mut self, final_state: &S) {
        debug_assert!(final_state.is_terminal());
        self.outcomes = self
            .player_ids
            .iter()
            .map(|&player| final_state.utility(player))
            .collect();
    }

    /// Whether `finish` has filled the outcomes.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcomes.len() == self.states.len()
    }

    /// Get the number of steps.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if the rollout is empty.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Steps made by a specific player.
    pub fn player_steps(&self, player: PlayerId) -> impl Iterator<Item = usize> + '_ {
        self.player_ids
            .iter()
            .enumerate()
            .filter(move |(_, p)| **p == player)
            .map(|(i, _)| i)
    }
}

impl<S: GameState> Default for GameRolloutData<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// An evaluator that can learn from finished games.
///
/// The crate only defines the interface; numeric training belongs to the
/// implementor.
pub trait TrainableEvaluator<S: GameState>: Evaluator<S> {
    fn train(&mut self, rollout: &GameRolloutData<S>) -> Result<()>;
}

/// Play one game from `state`, evaluating every decision with `policy` and
/// following `choose` to pick the move.
///
/// Chance moves are sampled by `choose` as well but are not recorded.
pub fn play_game<S, E, F>(state: S, policy: &mut E, mut choose: F) -> Result<GameRolloutData<S>>
where
    S: GameState,
    E: Evaluator<S> + ?Sized,
    F: FnMut(&S, &Evaluation<S::Action>) -> Result<S::Action>,
{
    let mut rollout = GameRolloutData::new();
    let mut current = state;

    while !current.is_terminal() {
        let evaluation = policy.evaluate(&current)?;
        let action = choose(&current, &evaluation)?;
        let next = current.apply(&action);
        rollout.record(current, evaluation);
        current = next;
    }

    rollout.finish(&current);
    Ok(rollout)
}
