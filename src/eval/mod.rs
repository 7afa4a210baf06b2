//! Leaf evaluation for the tree search.
//!
//! ## Overview
//!
//! - **Contract**: `Evaluator::evaluate(state) -> Evaluation` (prior + value)
//! - **Values**: `ValueEstimate` with point (`f64`), `GaussianValue` and
//!   `BetaValue` implementations
//! - **Baselines**: `RandomEvaluator`, `RandomRolloutEvaluator`,
//!   `FirstActionEvaluator`
//!
//! ## Usage
//!
//! ```rust
//! use rust_mcts::eval::{Evaluator, RandomEvaluator};
//! use rust_mcts::games::tictactoe::TicTacToe;
//!
//! let mut evaluator = RandomEvaluator::new();
//! let prior = evaluator.action_probabilities(&TicTacToe::new()).unwrap();
//! assert_eq!(prior.len(), 9);
//! ```

pub mod evaluation;
pub mod evaluators;
pub mod value;

pub use evaluation::{uniform_prior, ActionProbabilities, Evaluation, Evaluator};
pub use evaluators::{FirstActionEvaluator, RandomEvaluator, RandomRolloutEvaluator};
pub use value::{BetaValue, GaussianValue, ValueEstimate};
