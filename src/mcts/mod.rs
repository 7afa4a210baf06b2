//! Monte Carlo Tree Search with an outcome solver.
//!
//! ## Overview
//!
//! - **Arena tree**: `SearchTree` stores `SearchNode`s in a flat vector
//!   addressed by `NodeId`
//! - **Exploration**: `ExplorationStrategy` scores children; `MeanReward`
//!   and `Uct` (UCB1 or PUCT bonus) are provided
//! - **Solver**: exact outcomes from terminal states propagate upwards, and
//!   solved branches are skipped while their parent is unsolved
//! - **Chance nodes**: descended by sampling the prior
//! - **N-Player Support**: rewards are tracked per player
//! - **Composition**: `TreeSearchPolicy` is itself an `Evaluator`
//!
//! ## Usage
//!
//! ```rust
//! use rust_mcts::eval::RandomEvaluator;
//! use rust_mcts::games::tictactoe::TicTacToe;
//! use rust_mcts::mcts::{SearchParams, TreeSearch, Uct};
//!
//! let mut search = TreeSearch::new(Uct::default(), SearchParams::default().with_simulations(200));
//! let tree = search.build_tree(&TicTacToe::new(), &mut RandomEvaluator).unwrap();
//!
//! let probs = tree.visit_distribution(tree.root()).unwrap();
//! let total: f64 = probs.values().sum();
//! assert!((total - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Custom Strategies
//!
//! ```rust
//! use rust_mcts::mcts::{MeanReward, SearchParams, TreeSearch, Uct};
//!
//! let greedy = TreeSearch::new(MeanReward, SearchParams::default());
//! let ucb1 = TreeSearch::new(Uct::uct(1.0), SearchParams::default());
//! # let _ = (greedy, ucb1);
//! ```

pub mod config;
pub mod node;
pub mod noise;
pub mod policy;
pub mod search;
pub mod stats;
pub mod strategy;
pub mod tree;

// Re-export main types
pub use config::{SearchParams, ValueBackup};
pub use node::{NodeId, Outcome, SearchNode};
pub use noise::DirichletNoise;
pub use policy::{StochasticPolicy, TreeSearchPolicy};
pub use search::TreeSearch;
pub use stats::SearchStats;
pub use strategy::{Bonus, ExplorationStrategy, MeanReward, Uct};
pub use tree::{leaf_rewards, LeafEvaluation, SearchTree, TreeStats};
