//! Game abstraction consumed by the search.
//!
//! The search calls into `GameState` but never interprets game-specific
//! concepts directly.

pub mod state;

pub use state::GameState;
