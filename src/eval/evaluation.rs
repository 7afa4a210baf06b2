//! The evaluation contract between the search and leaf evaluators.

use rustc_hash::FxHashMap;

use crate::core::Result;
use crate::game::GameState;

use super::value::ValueEstimate;

/// Mapping from action to probability.
///
/// Used for evaluator priors and for search visit distributions. Actions
/// missing from the map have probability zero. `FxHashMap` iterates in a
/// deterministic order, so seeded searches are reproducible.
pub type ActionProbabilities<A> = FxHashMap<A, f64>;

/// Prior over actions plus a value estimate for the acting player.
#[derive(Debug)]
pub struct Evaluation<A> {
    /// Prior probability per action. Zero-probability actions are never
    /// expanded; probabilities need not sum to exactly 1.
    pub prior: ActionProbabilities<A>,

    /// Value of the state for its acting player.
    pub value: Box<dyn ValueEstimate>,
}

impl<A> Evaluation<A> {
    pub fn new(prior: ActionProbabilities<A>, value: impl ValueEstimate + 'static) -> Self {
        Self {
            prior,
            value: Box::new(value),
        }
    }
}

/// Evaluates nonterminal game states.
///
/// Implementations could be:
/// - `RandomEvaluator`: uniform prior, neutral value (for testing)
/// - `RandomRolloutEvaluator`: uniform prior, value from random playouts
/// - `TreeSearchPolicy`: a nested search standing in for an evaluator
/// - neural networks wrapped by the caller
///
/// Terminal states never reach an evaluator; the search reads their
/// utilities directly.
pub trait Evaluator<S: GameState> {
    /// Evaluate a nonterminal state.
    ///
    /// The prior's keys must be a subset of `state.legal_actions()`.
    fn evaluate(&mut self, state: &S) -> Result<Evaluation<S::Action>>;

    /// Point value of `state` for its acting player.
    fn value(&mut self, state: &S) -> Result<f64> {
        Ok(self.evaluate(state)?.value.mean())
    }

    /// Prior over the actions of `state`.
    fn action_probabilities(&mut self, state: &S) -> Result<ActionProbabilities<S::Action>> {
        Ok(self.evaluate(state)?.prior)
    }
}

impl<S: GameState, E: Evaluator<S> + ?Sized> Evaluator<S> for &mut E {
    fn evaluate(&mut self, state: &S) -> Result<Evaluation<S::Action>> {
        (**self).evaluate(state)
    }
}

/// Equal probability for each of `actions`.
///
/// ```
/// use rust_mcts::eval::uniform_prior;
///
/// let prior = uniform_prior(&['a', 'b']);
/// assert_eq!(prior[&'a'], 0.5);
/// ```
pub fn uniform_prior<A: Clone + Eq + std::hash::Hash>(actions: &[A]) -> ActionProbabilities<A> {
    if actions.is_empty() {
        return ActionProbabilities::default();
    }
    let prob = 1.0 / actions.len() as f64;
    actions.iter().map(|a| (a.clone(), prob)).collect()
}
