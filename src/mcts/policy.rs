//! Search-backed policies.
//!
//! `TreeSearchPolicy` pairs a `TreeSearch` with a leaf evaluator. Each query
//! builds a fresh tree and reads the root's visit distribution, so the
//! policy can drive self-play directly or stand in as the evaluator of an
//! outer search.

use crate::core::{MctsError, Result, SearchRng};
use crate::eval::{ActionProbabilities, Evaluation, Evaluator};
use crate::game::GameState;
use crate::training::{GameRolloutData, TrainableEvaluator};

use super::config::SearchParams;
use super::search::TreeSearch;
use super::strategy::ExplorationStrategy;
use super::tree::SearchTree;

/// A policy that yields a probability for every action it may take.
pub trait StochasticPolicy<S: GameState> {
    /// Probability of each action at `state`.
    fn action_probabilities(&mut self, state: &S) -> Result<ActionProbabilities<S::Action>>;

    /// Sample an action from `action_probabilities`.
    fn sample_action(&mut self, state: &S, rng: &mut SearchRng) -> Result<S::Action> {
        let (actions, weights): (Vec<_>, Vec<_>) = self.action_probabilities(state)?.into_iter().unzip();
        let index = rng.choose_weighted(&weights).ok_or(MctsError::EmptyPrior)?;
        Ok(actions[index].clone())
    }
}

/// Tree search over `evaluator`, exposed as a policy and an evaluator.
#[derive(Clone, Debug)]
pub struct TreeSearchPolicy<St, E> {
    search: TreeSearch<St>,
    evaluator: E,
}

impl<St, E> TreeSearchPolicy<St, E> {
    pub fn new(strategy: St, evaluator: E, params: SearchParams) -> Self {
        Self {
            search: TreeSearch::new(strategy, params),
            evaluator,
        }
    }

    /// Wrap an existing search context.
    pub fn from_search(search: TreeSearch<St>, evaluator: E) -> Self {
        Self { search, evaluator }
    }

    #[must_use]
    pub fn search(&self) -> &TreeSearch<St> {
        &self.search
    }

    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn evaluator_mut(&mut self) -> &mut E {
        &mut self.evaluator
    }

    /// Search from `state` and return the tree.
    pub fn build_tree<S>(&mut self, state: &S) -> Result<SearchTree<S>>
    where
        S: GameState,
        St: ExplorationStrategy<S>,
        E: Evaluator<S>,
    {
        self.search.build_tree(state, &mut self.evaluator)
    }

    /// Visit distribution of the root after a fresh search.
    pub fn action_probabilities<S>(&mut self, state: &S) -> Result<ActionProbabilities<S::Action>>
    where
        S: GameState,
        St: ExplorationStrategy<S>,
        E: Evaluator<S>,
    {
        let tree = self.build_tree(state)?;
        tree.visit_distribution(tree.root())
    }

    /// Search, then sample an action from the visit distribution using the
    /// search's own RNG.
    pub fn choose_action<S>(&mut self, state: &S) -> Result<S::Action>
    where
        S: GameState,
        St: ExplorationStrategy<S>,
        E: Evaluator<S>,
    {
        let (actions, weights): (Vec<_>, Vec<_>) = self.action_probabilities(state)?.into_iter().unzip();
        let index = self
            .search
            .rng_mut()
            .choose_weighted(&weights)
            .ok_or(MctsError::EmptyPrior)?;
        Ok(actions[index].clone())
    }
}

impl<S, St, E> StochasticPolicy<S> for TreeSearchPolicy<St, E>
where
    S: GameState,
    St: ExplorationStrategy<S>,
    E: Evaluator<S>,
{
    fn action_probabilities(&mut self, state: &S) -> Result<ActionProbabilities<S::Action>> {
        TreeSearchPolicy::action_probabilities(self, state)
    }
}

impl<S, St, E> Evaluator<S> for TreeSearchPolicy<St, E>
where
    S: GameState,
    St: ExplorationStrategy<S>,
    E: Evaluator<S>,
{
    /// The root's visit distribution as prior, its estimated value as value.
    fn evaluate(&mut self, state: &S) -> Result<Evaluation<S::Action>> {
        let tree = self.build_tree(state)?;
        let prior = tree.visit_distribution(tree.root())?;
        let value = self.search.estimate_value(&tree);
        Ok(Evaluation::new(prior, value))
    }
}

impl<S, St, E> TrainableEvaluator<S> for TreeSearchPolicy<St, E>
where
    S: GameState,
    St: ExplorationStrategy<S>,
    E: TrainableEvaluator<S>,
{
    fn train(&mut self, rollout: &GameRolloutData<S>) -> Result<()> {
        self.evaluator.train(rollout)
    }
}
