//! Tic-tac-toe, the smallest game with an interesting solved value.
//!
//! Small enough that the search can prove the empty board is a draw, which
//! makes it the end-to-end check for the outcome solver.

mod game;

pub use game::TicTacToe;
