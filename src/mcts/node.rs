//! Search tree vertices.
//!
//! Nodes live in the `SearchTree` arena and reference each other by
//! `NodeId`. A node owns its children through the arena; the parent link is
//! a plain index used only to walk back up the tree.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Actor, PlayerId, PlayerMap};
use crate::game::GameState;

/// Index into the SearchTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Game-theoretic status of a subtree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Optimal play from here is not known yet.
    #[default]
    Unsolved,
    /// Utilities for every player under optimal play.
    Solved(PlayerMap<f64>),
}

impl Outcome {
    /// The solved reward for `actor`, or `None` if unsolved or chance.
    #[must_use]
    pub fn reward_for(&self, actor: Actor) -> Option<f64> {
        match self {
            Outcome::Solved(rewards) => Some(rewards[actor.player_id()?]),
            Outcome::Unsolved => None,
        }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }
}

/// A position in the explored game tree.
///
/// Lifecycle: created unvisited by its parent's expansion; visited exactly
/// once, at which point it caches its state and either becomes terminal
/// (solved from the game's utilities) or is expanded with one child per
/// action of positive prior.
#[derive(Clone, Debug)]
pub struct SearchNode<S: GameState> {
    parent: NodeId,
    parent_action: Option<S::Action>,
    depth: u16,

    pub(super) visited: bool,
    pub(super) terminal: bool,

    /// Simulations that passed through or ended on this node.
    pub(super) explore_count: u32,

    /// Prior of the action leading here, from the parent's evaluation.
    prior_probability: f64,

    /// Sum of backed-up rewards, per player.
    pub(super) total_reward: PlayerMap<f64>,

    pub(super) state: Option<S>,
    pub(super) children: SmallVec<[(S::Action, NodeId); 8]>,

    pub(super) outcome: Outcome,
    pub(super) best_action: Option<S::Action>,
}

impl<S: GameState> SearchNode<S> {
    /// Create an empty root node.
    pub fn root(player_count: usize) -> Self {
        Self::new(NodeId::NONE, None, 0.0, 0, player_count)
    }

    /// Create an unvisited child reached from `parent` by `action`.
    pub fn child(parent: NodeId, action: S::Action, prior: f64, depth: u16, player_count: usize) -> Self {
        Self::new(parent, Some(action), prior, depth, player_count)
    }

    fn new(
        parent: NodeId,
        parent_action: Option<S::Action>,
        prior_probability: f64,
        depth: u16,
        player_count: usize,
    ) -> Self {
        Self {
            parent,
            parent_action,
            depth,
            visited: false,
            terminal: false,
            explore_count: 0,
            prior_probability,
            total_reward: PlayerMap::with_value(player_count, 0.0),
            state: None,
            children: SmallVec::new(),
            outcome: Outcome::Unsolved,
            best_action: None,
        }
    }

    /// Parent node (NONE for the root).
    #[inline]
    #[must_use]
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// The action the parent took to reach this node (None for the root).
    #[must_use]
    pub fn parent_action(&self) -> Option<&S::Action> {
        self.parent_action.as_ref()
    }

    /// Depth in tree (root = 0).
    #[must_use]
    pub fn depth(&self) -> u16 {
        self.depth
    }

    #[must_use]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// A leaf has no children: it is unvisited or terminal.
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn explore_count(&self) -> u32 {
        self.explore_count
    }

    #[must_use]
    pub fn prior_probability(&self) -> f64 {
        self.prior_probability
    }

    /// Total backed-up reward for a player.
    #[must_use]
    pub fn total_reward(&self, player: PlayerId) -> f64 {
        self.total_reward[player]
    }

    /// Mean backed-up reward for a player; 0 before the first visit.
    #[must_use]
    pub fn mean_reward(&self, player: PlayerId) -> f64 {
        if self.explore_count == 0 {
            0.0
        } else {
            self.total_reward[player] / self.explore_count as f64
        }
    }

    /// The cached game state, present once visited.
    #[must_use]
    pub fn state(&self) -> Option<&S> {
        self.state.as_ref()
    }

    /// Who acts at this node, once visited.
    #[must_use]
    pub fn acting_player(&self) -> Option<Actor> {
        self.state.as_ref().map(GameState::current_player)
    }

    /// (action, child) pairs in expansion order.
    pub fn children(&self) -> impl Iterator<Item = (&S::Action, NodeId)> + '_ {
        self.children.iter().map(|(action, id)| (action, *id))
    }

    /// Number of children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Child reached by `action`, if expanded.
    #[must_use]
    pub fn child_for(&self, action: &S::Action) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(a, _)| a == action)
            .map(|(_, id)| *id)
    }

    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.outcome.is_solved()
    }

    /// Optimal action, set once the node is solved by its children.
    #[must_use]
    pub fn best_action(&self) -> Option<&S::Action> {
        self.best_action.as_ref()
    }

    /// Solved reward for the player acting here.
    #[must_use]
    pub fn solved_value(&self) -> Option<f64> {
        self.outcome.reward_for(self.acting_player()?)
    }
}
