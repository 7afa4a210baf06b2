//! Training data produced by search.
//!
//! ## Overview
//!
//! - **GameRolloutData**: states, search evaluations and acting players of
//!   one game, plus per-step outcomes once it ends
//! - **TrainableEvaluator**: evaluators that can consume rollouts
//! - **play_game**: drive a game with a policy and record it
//!
//! ## Usage
//!
//! ```rust
//! use rust_mcts::core::SearchRng;
//! use rust_mcts::eval::RandomEvaluator;
//! use rust_mcts::games::tictactoe::TicTacToe;
//! use rust_mcts::mcts::{SearchParams, TreeSearchPolicy, Uct};
//! use rust_mcts::training::play_game;
//!
//! let mut policy = TreeSearchPolicy::new(
//!     Uct::default(),
//!     RandomEvaluator,
//!     SearchParams::default().with_simulations(16),
//! );
//! let mut rng = SearchRng::new(7);
//!
//! let rollout = play_game(TicTacToe::new(), &mut policy, |_, evaluation| {
//!     let (actions, weights): (Vec<_>, Vec<_>) =
//!         evaluation.prior.iter().map(|(a, p)| (*a, *p)).unzip();
//!     let index = rng.choose_weighted(&weights).unwrap_or(0);
//!     Ok(actions[index])
//! })
//! .unwrap();
//!
//! assert!(rollout.is_finished());
//! ```

pub mod rollout;

pub use rollout::{play_game, GameRolloutData, TrainableEvaluator};
