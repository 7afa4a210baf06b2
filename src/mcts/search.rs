//! Core tree search algorithm.
//!
//! Each simulation descends from the root to a leaf, choosing children by
//! the exploration strategy at player nodes and by prior at chance nodes,
//! then evaluates the leaf and backs its value up the path. Exact values
//! found at terminal states are propagated by the solver, and solved
//! children of unsolved nodes are skipped during descent.

use std::time::Instant;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{Actor, MctsError, Result, SearchRng};
use crate::eval::Evaluator;
use crate::game::GameState;

use super::config::SearchParams;
use super::node::{NodeId, Outcome};
use super::stats::SearchStats;
use super::strategy::ExplorationStrategy;
use super::tree::{LeafEvaluation, SearchTree};

/// Main search context.
///
/// Owns the exploration strategy, parameters and RNG. Every `build_tree`
/// call grows a fresh tree; the RNG carries over between calls, so a
/// sequence of searches is reproducible from `params.seed`.
#[derive(Clone, Debug)]
pub struct TreeSearch<St> {
    strategy: St,
    params: SearchParams,
    rng: SearchRng,
    stats: SearchStats,
}

impl<St> TreeSearch<St> {
    /// Create a new search context.
    pub fn new(strategy: St, params: SearchParams) -> Self {
        let rng = SearchRng::new(params.seed);
        Self {
            strategy,
            params,
            rng,
            stats: SearchStats::default(),
        }
    }

    /// Replace the RNG seeded from `params.seed`.
    pub fn with_rng(mut self, rng: SearchRng) -> Self {
        self.rng = rng;
        self
    }

    /// Get the exploration strategy.
    #[must_use]
    pub fn strategy(&self) -> &St {
        &self.strategy
    }

    /// Get the parameters.
    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Get search statistics from the last `build_tree` call.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search's random stream, e.g. to sample from its results.
    pub fn rng_mut(&mut self) -> &mut SearchRng {
        &mut self.rng
    }

    /// Search from `state` and return the resulting tree.
    ///
    /// The root is evaluated first, its prior mixed with noise if
    /// configured, and expanded. Then up to `num_simulations` simulations
    /// run, stopping early when the node limit is hit or, with
    /// `stop_when_solved`, once the root is solved.
    pub fn build_tree<S, E>(&mut self, state: &S, evaluator: &mut E) -> Result<SearchTree<S>>
    where
        S: GameState,
        St: ExplorationStrategy<S>,
        E: Evaluator<S> + ?Sized,
    {
        if self.params.num_simulations == 0 {
            return Err(MctsError::NoSimulations);
        }
        if state.is_terminal() {
            return Err(MctsError::TerminalRoot);
        }

        let start = Instant::now();
        self.stats.reset();

        let mut tree = SearchTree::new(state.player_count());
        let root = tree.root();

        let evaluation = evaluator.evaluate(state)?;
        let prior = match &self.params.noise {
            Some(noise) => noise.apply_to_prior(&evaluation.prior, &mut self.rng)?,
            None => evaluation.prior,
        };
        if tree.expand(root, state.clone(), &prior)? == 0 {
            return Err(MctsError::EmptyPrior);
        }
        self.stats.nodes_expanded = 1;

        for _ in 0..self.params.num_simulations {
            if self.params.stop_when_solved && tree.root_node().is_solved() {
                break;
            }
            let over_budget = self.params.max_nodes > 0 && tree.len() >= self.params.max_nodes;
            if over_budget && self.stats.simulations > 0 {
                break;
            }
            self.simulate(&mut tree, evaluator)?;

            if !self.stats.root_solved && tree.root_node().is_solved() {
                self.stats.root_solved = true;
                debug!(
                    simulations = self.stats.simulations,
                    best_action = ?tree.root_node().best_action(),
                    value = ?tree.root_node().solved_value(),
                    "root solved"
                );
            }
        }

        debug_assert_eq!(
            tree.root_node().explore_count(),
            tree.root_node()
                .children()
                .map(|(_, child)| tree.get(child).explore_count())
                .sum::<u32>(),
            "every simulation through the root continues into a child"
        );

        self.stats.time_us = start.elapsed().as_micros() as u64;

        debug!(
            seed = self.rng.seed(),
            simulations = self.stats.simulations,
            nodes = tree.len(),
            root_solved = self.stats.root_solved,
            time_us = self.stats.time_us,
            "search complete"
        );

        Ok(tree)
    }

    /// Value of the searched root for the player acting there.
    pub fn estimate_value<S>(&self, tree: &SearchTree<S>) -> f64
    where
        S: GameState,
        St: ExplorationStrategy<S>,
    {
        self.strategy.estimate_value(tree.root_node())
    }

    /// One simulation: descend, evaluate, back up.
    fn simulate<S, E>(&mut self, tree: &mut SearchTree<S>, evaluator: &mut E) -> Result<()>
    where
        S: GameState,
        St: ExplorationStrategy<S>,
        E: Evaluator<S> + ?Sized,
    {
        let leaf = self.explore_to_leaf(tree)?;
        let node = tree.get(leaf);
        let depth = node.depth();
        let terminal = node.is_terminal();

        if terminal {
            // Every arrival at a terminal backs up its exact utilities.
            if let Outcome::Solved(utilities) = node.outcome() {
                let utilities = utilities.clone();
                tree.backpropagate(leaf, &utilities);
            }
            self.stats.terminal_visits += 1;
        } else {
            match tree.evaluate_leaf(leaf, evaluator, self.params.value_backup, &mut self.rng)? {
                LeafEvaluation::Terminal => self.stats.terminal_visits += 1,
                LeafEvaluation::Expanded(_) => self.stats.nodes_expanded += 1,
                LeafEvaluation::AlreadyVisited => {}
            }
        }
        let terminal = terminal || tree.get(leaf).is_terminal();

        self.stats.simulations += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        trace!(leaf = %leaf, depth, terminal, "simulation complete");
        Ok(())
    }

    /// Follow exploration choices from the root down to a leaf, counting
    /// the arrival at every node on the way.
    pub fn explore_to_leaf<S>(&mut self, tree: &mut SearchTree<S>) -> Result<NodeId>
    where
        S: GameState,
        St: ExplorationStrategy<S>,
    {
        let mut current = tree.root();
        tree.record_arrival(current);

        while !tree.get(current).is_leaf() {
            current = self.select_child(tree, current)?;
            tree.record_arrival(current);
        }

        Ok(current)
    }

    fn select_child<S>(&mut self, tree: &SearchTree<S>, id: NodeId) -> Result<NodeId>
    where
        S: GameState,
        St: ExplorationStrategy<S>,
    {
        let node = tree.get(id);

        match node.acting_player() {
            Some(Actor::Chance) => {
                let weights: SmallVec<[f64; 8]> = node
                    .children()
                    .map(|(_, child)| tree.get(child).prior_probability())
                    .collect();
                let index = self
                    .rng
                    .choose_weighted(&weights)
                    .ok_or(MctsError::EmptyPrior)?;
                node.children()
                    .nth(index)
                    .map(|(_, child)| child)
                    .ok_or(MctsError::InvalidNode(id))
            }
            Some(Actor::Player(player)) => {
                let parent_visits = node.explore_count();
                let skip_solved = !node.is_solved();
                let strategy = &self.strategy;

                tree.choose_child(id, |child| {
                    if skip_solved && child.is_solved() {
                        f64::NEG_INFINITY
                    } else {
                        strategy.exploration_score(child, parent_visits, player)
                    }
                })
                .map(|(_, child)| child)
            }
            None => Err(MctsError::InvalidNode(id)),
        }
    }
}
