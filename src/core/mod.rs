//! Core types: players, the search RNG, and the crate error.
//!
//! These are game-agnostic building blocks shared by the evaluators and the
//! tree search.

pub mod error;
pub mod player;
pub mod rng;

pub use error::{MctsError, Result};
pub use player::{Actor, PlayerId, PlayerMap};
pub use rng::SearchRng;
