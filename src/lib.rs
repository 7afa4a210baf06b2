//! # rust-mcts
//!
//! A generic Monte Carlo Tree Search engine for turn-based games, with
//! UCT/PUCT exploration, an outcome solver and search-as-evaluator
//! composition.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: Games plug in through the `GameState` trait. The
//!    search never interprets game-specific concepts.
//!
//! 2. **N-Player First**: Rewards are tracked per player, and chance can
//!    act at any node.
//!
//! 3. **Deterministic**: All randomness flows through a seeded
//!    `SearchRng`, so a search is reproducible from its parameters.
//!
//! ## Architecture
//!
//! - **Arena Tree**: Nodes live in a flat vector and reference each other
//!   by index. No reference counting, no unsafe code.
//!
//! - **Solver**: Terminal utilities are exact. Once every child of a node
//!   is solved the node takes its best child's outcome, and solved
//!   branches stop receiving simulations.
//!
//! - **Composition**: A finished search is itself an `Evaluator`, so it
//!   can stand in as the leaf evaluator of another search.
//!
//! ## Modules
//!
//! - `core`: Players, the search RNG, errors
//! - `game`: The `GameState` trait games implement
//! - `eval`: Evaluations, value estimates and reference evaluators
//! - `mcts`: The tree, exploration strategies, search loop and policy
//! - `training`: Per-game records of search output
//! - `games`: Small reference games (tic-tac-toe, Nim)

pub mod core;
pub mod eval;
pub mod game;
pub mod games;
pub mod mcts;
pub mod training;

// Re-export commonly used types
pub use crate::core::{Actor, MctsError, PlayerId, PlayerMap, Result, SearchRng};

pub use crate::game::GameState;

pub use crate::eval::{
    ActionProbabilities, BetaValue, Evaluation, Evaluator, GaussianValue,
    RandomEvaluator, RandomRolloutEvaluator, ValueEstimate,
};

pub use crate::mcts::{
    Bonus, DirichletNoise, ExplorationStrategy, MeanReward, NodeId, Outcome,
    SearchNode, SearchParams, SearchStats, SearchTree, StochasticPolicy,
    TreeSearch, TreeSearchPolicy, TreeStats, Uct, ValueBackup,
};

pub use crate::training::{GameRolloutData, TrainableEvaluator};
