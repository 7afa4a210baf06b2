//! Arena-based search tree.
//!
//! Uses a flat `Vec<SearchNode>` with index-based references. The tree owns
//! every node; parents are reached through `NodeId` links, never pointers.
//!
//! The operations here are the building blocks of one simulation:
//! `expand` a visited node, `evaluate_leaf` a newly reached one,
//! `backpropagate` its rewards and `try_solve` upwards when exact values
//! become known.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::config::ValueBackup;
use super::node::{NodeId, Outcome, SearchNode};
use crate::core::{Actor, MctsError, PlayerId, PlayerMap, Result, SearchRng};
use crate::eval::{ActionProbabilities, Evaluator};
use crate::game::GameState;

/// What `evaluate_leaf` did with a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeafEvaluation {
    /// The node had been evaluated before; nothing changed.
    AlreadyVisited,
    /// The node's state is terminal; it is now solved.
    Terminal,
    /// The node was evaluated and given this many children.
    Expanded(usize),
}

/// Arena-based search tree.
///
/// Nodes are stored in a flat vector and referenced by `NodeId` indices.
/// The root is always `NodeId(0)`.
#[derive(Clone, Debug)]
pub struct SearchTree<S: GameState> {
    nodes: Vec<SearchNode<S>>,
    root: NodeId,
    player_count: usize,
}

impl<S: GameState> SearchTree<S> {
    /// Create a tree holding a single unvisited root.
    pub fn new(player_count: usize) -> Self {
        Self::with_capacity(player_count, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(player_count: usize, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(SearchNode::root(player_count));
        Self {
            nodes,
            root: NodeId::new(0),
            player_count,
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &SearchNode<S> {
        self.get(self.root)
    }

    /// Get a node by ID.
    ///
    /// Panics on an ID from another tree; use `try_get` when unsure.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.0 as usize]
    }

    /// Get a node by ID, or `InvalidNode`.
    pub fn try_get(&self, id: NodeId) -> Result<&SearchNode<S>> {
        self.nodes
            .get(id.0 as usize)
            .ok_or(MctsError::InvalidNode(id))
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<S> {
        &mut self.nodes[id.0 as usize]
    }

    fn alloc(&mut self, node: SearchNode<S>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Player count for this tree.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode<S>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Child of `id` reached by `action`.
    #[must_use]
    pub fn child(&self, id: NodeId, action: &S::Action) -> Option<NodeId> {
        self.try_get(id).ok()?.child_for(action)
    }

    /// Count one more simulation passing through `id`.
    pub(super) fn record_arrival(&mut self, id: NodeId) {
        self.get_mut(id).explore_count += 1;
    }

    /// Mark `id` visited with `state` and create one child per action of
    /// positive prior.
    ///
    /// Returns the number of children created. The caller decides what an
    /// empty expansion means.
    pub fn expand(
        &mut self,
        id: NodeId,
        state: S,
        prior: &ActionProbabilities<S::Action>,
    ) -> Result<usize> {
        let node = self.try_get(id)?;
        let depth = node.depth().saturating_add(1);
        let player_count = self.player_count;

        let mut created = 0;
        for (action, &p) in prior {
            if p <= 0.0 {
                continue;
            }
            let child = self.alloc(SearchNode::child(id, action.clone(), p, depth, player_count));
            self.get_mut(id).children.push((action.clone(), child));
            created += 1;
        }

        let node = self.get_mut(id);
        node.visited = true;
        node.state = Some(state);
        Ok(created)
    }

    /// Visit a newly reached node.
    ///
    /// Computes its state from the parent's. A terminal state solves the
    /// node from the game's utilities, which are backed up before solving
    /// upwards. Otherwise the evaluator supplies the prior for expansion
    /// and a value that is backed up to the root. A prior with no positive
    /// entry is `EmptyPrior` and leaves the node unvisited. Calling this on
    /// an already visited node does nothing.
    pub fn evaluate_leaf<E: Evaluator<S> + ?Sized>(
        &mut self,
        id: NodeId,
        evaluator: &mut E,
        backup: ValueBackup,
        rng: &mut SearchRng,
    ) -> Result<LeafEvaluation> {
        let node = self.try_get(id)?;
        if node.visited {
            return Ok(LeafEvaluation::AlreadyVisited);
        }

        let parent = node.parent();
        let state = match (node.parent_action(), self.parent_state(parent)) {
            (Some(action), Some(parent_state)) => parent_state.apply(action),
            _ => return Err(MctsError::MissingParentState(id)),
        };

        if state.is_terminal() {
            let utilities = state.utilities();
            let node = self.get_mut(id);
            node.visited = true;
            node.terminal = true;
            node.outcome = Outcome::Solved(utilities.clone());
            node.state = Some(state);

            self.backpropagate(id, &utilities);
            self.try_solve(parent)?;
            return Ok(LeafEvaluation::Terminal);
        }

        let evaluation = evaluator.evaluate(&state)?;
        if !evaluation.prior.values().any(|&p| p > 0.0) {
            return Err(MctsError::EmptyPrior);
        }
        let value = match backup {
            ValueBackup::Mean => evaluation.value.mean(),
            ValueBackup::Sample => evaluation.value.sample(rng),
        };
        let rewards = leaf_rewards(value, state.current_player(), self.player_count);

        let children = self.expand(id, state, &evaluation.prior)?;

        self.backpropagate(id, &rewards);
        Ok(LeafEvaluation::Expanded(children))
    }

    fn parent_state(&self, parent: NodeId) -> Option<&S> {
        if parent.is_none() {
            return None;
        }
        self.try_get(parent).ok()?.state()
    }

    /// Add `rewards` to the totals of `from` and every ancestor.
    pub fn backpropagate(&mut self, from: NodeId, rewards: &PlayerMap<f64>) {
        let mut current = from;
        while !current.is_none() {
            let node = self.get_mut(current);
            node.total_reward.accumulate(rewards);
            current = node.parent();
        }
    }

    /// Solve `id` from its children, then its ancestors, as far as possible.
    ///
    /// A node is solved once every child is solved and a player acts at it;
    /// it takes the outcome of the child best for that player. The scan
    /// stops at the first child reaching the game's maximum utility. Nodes
    /// where chance acts are never solved.
    pub fn try_solve(&mut self, id: NodeId) -> Result<()> {
        let mut current = id;

        while !current.is_none() {
            let node = self.try_get(current)?;
            if node.is_solved() || node.is_terminal() {
                return Ok(());
            }
            let Some(state) = node.state() else {
                return Ok(());
            };
            let Actor::Player(player) = state.current_player() else {
                return Ok(());
            };
            if node.is_leaf() {
                return Err(MctsError::UnsolvableNode(current));
            }

            let max_utility = state.max_utility();
            let mut best: Option<(&S::Action, NodeId, f64)> = None;
            for (action, child) in node.children() {
                let Some(reward) = self.get(child).outcome().reward_for(Actor::Player(player)) else {
                    return Ok(());
                };
                if best.map_or(true, |(_, _, best_reward)| reward > best_reward) {
                    best = Some((action, child, reward));
                }
                if reward >= max_utility {
                    break;
                }
            }

            let Some((action, child, reward)) = best else {
                return Err(MctsError::UnsolvableNode(current));
            };
            let action = action.clone();
            let outcome = self.get(child).outcome().clone();

            trace!(node = %current, %player, reward, "solved");

            let node = self.get_mut(current);
            node.outcome = outcome;
            node.best_action = Some(action);
            current = node.parent();
        }

        Ok(())
    }

    /// The child of `id` with the highest score, first one on ties.
    ///
    /// When every score is -inf (or NaN) the first child is returned.
    pub fn choose_child<F>(&self, id: NodeId, mut score: F) -> Result<(S::Action, NodeId)>
    where
        F: FnMut(&SearchNode<S>) -> f64,
    {
        let node = self.try_get(id)?;
        let mut children = node.children();
        let Some((first_action, first_child)) = children.next() else {
            return Err(MctsError::LeafNode(id));
        };

        let mut best = (first_action, first_child);
        let mut best_score = score(self.get(first_child));
        for (action, child) in children {
            let s = score(self.get(child));
            if s > best_score {
                best = (action, child);
                best_score = s;
            }
        }

        Ok((best.0.clone(), best.1))
    }

    /// The action at `id` whose child maximizes `score`.
    pub fn choose_action<F>(&self, id: NodeId, score: F) -> Result<S::Action>
    where
        F: FnMut(&SearchNode<S>) -> f64,
    {
        self.choose_child(id, score).map(|(action, _)| action)
    }

    /// Visit counts of the children of `id`, normalized by its own count.
    ///
    /// Sums to 1 whenever every simulation through `id` continued into a
    /// child, which holds for the root of a tree built by `TreeSearch`.
    pub fn visit_distribution(&self, id: NodeId) -> Result<ActionProbabilities<S::Action>> {
        let node = self.try_get(id)?;
        if node.is_leaf() {
            return Err(MctsError::LeafNode(id));
        }
        if node.explore_count() == 0 {
            return Err(MctsError::ZeroExploreCount(id));
        }

        let total = node.explore_count() as f64;
        Ok(node
            .children()
            .map(|(action, child)| (action.clone(), self.get(child).explore_count() as f64 / total))
            .collect())
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            node_count: self.nodes.len(),
            ..TreeStats::default()
        };
        for node in &self.nodes {
            stats.max_depth = stats.max_depth.max(node.depth());
            stats.visited_count += usize::from(node.is_visited());
            stats.terminal_count += usize::from(node.is_terminal());
            stats.solved_count += usize::from(node.is_solved());
            if !node.is_leaf() {
                stats.expanded_count += 1;
                stats.total_children += node.child_count();
            }
        }
        stats
    }
}

/// Rewards to back up for a leaf valued `value` by its acting player.
///
/// In multi-player games the other players share the opposite of the value,
/// so every backup sums to zero. Chance leaves carry no value.
pub fn leaf_rewards(value: f64, actor: Actor, player_count: usize) -> PlayerMap<f64> {
    match actor {
        Actor::Chance => PlayerMap::with_value(player_count, 0.0),
        Actor::Player(acting) => {
            let others = -value / (player_count.max(2) - 1) as f64;
            PlayerMap::new(player_count, |p: PlayerId| if p == acting { value } else { others })
        }
    }
}

/// Statistics about the search tree.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth of any node.
    pub max_depth: u16,

    /// Nodes whose state has been computed.
    pub visited_count: usize,

    /// Number of terminal nodes.
    pub terminal_count: usize,

    /// Nodes with a known game-theoretic outcome.
    pub solved_count: usize,

    /// Nodes with children.
    pub expanded_count: usize,

    /// Sum of children over all expanded nodes.
    pub total_children: usize,
}

impl TreeStats {
    /// Average children per expanded node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.expanded_count == 0 {
            0.0
        } else {
            self.total_children as f64 / self.expanded_count as f64
        }
    }

    /// Fraction of nodes that have been visited.
    #[must_use]
    pub fn visited_ratio(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.visited_count as f64 / self.node_count as f64
        }
    }
}
