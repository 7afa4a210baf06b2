//! Reference games used by tests and benchmarks.

pub mod nim;
pub mod tictactoe;
