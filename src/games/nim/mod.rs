//! Subtraction-game Nim.
//!
//! A single pile; players alternately remove between 1 and `max_take`
//! sticks, and whoever takes the last stick wins. The player to move loses
//! exactly when `sticks % (max_take + 1) == 0`, which gives the solver a
//! closed-form answer to check against.

mod game;

pub use game::Nim;
