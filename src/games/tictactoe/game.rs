//! Tic-tac-toe state and rules.

use crate::core::{Actor, PlayerId};
use crate::game::GameState;

/// The eight winning lines, as cell indices.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A tic-tac-toe position.
///
/// Cells are numbered 0-8 row by row. Player 0 plays X and moves first.
/// A win scores +1, a loss -1, a draw 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct TicTacToe {
    cells: [Option<PlayerId>; 9],
    to_move: u8,
}

impl TicTacToe {
    /// The empty board, X to move.
    pub fn new() -> Self {
        Self::default()
    }

    /// Play a sequence of cells from the empty board.
    ///
    /// Returns `None` if any move is illegal.
    pub fn from_moves(moves: &[u8]) -> Option<Self> {
        moves.iter().try_fold(Self::new(), |state, &cell| {
            if state.is_legal(cell) {
                Some(state.apply(&cell))
            } else {
                None
            }
        })
    }

    fn is_legal(&self, cell: u8) -> bool {
        !self.is_terminal() && (cell as usize) < 9 && self.cells[cell as usize].is_none()
    }

    /// Owner of a cell.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<PlayerId> {
        self.cells[index]
    }

    /// The player holding a complete line, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        LINES.iter().find_map(|line| {
            let first = self.cells[line[0]]?;
            line.iter()
                .all(|&i| self.cells[i] == Some(first))
                .then_some(first)
        })
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

impl GameState for TicTacToe {
    type Action = u8;

    fn player_count(&self) -> usize {
        2
    }

    fn current_player(&self) -> Actor {
        Actor::player(self.to_move)
    }

    fn legal_actions(&self) -> Vec<u8> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..9u8).filter(|&i| self.cells[i as usize].is_none()).collect()
    }

    fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    fn apply(&self, action: &u8) -> Self {
        debug_assert!(self.is_legal(*action), "illegal move {action}");
        let mut next = *self;
        next.cells[*action as usize] = Some(PlayerId::new(self.to_move));
        next.to_move = 1 - self.to_move;
        next
    }

    fn utility(&self, player: PlayerId) -> f64 {
        match self.winner() {
            Some(winner) if winner == player => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        }
    }

    fn max_utility(&self) -> f64 {
        1.0
    }
}

impl std::fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let symbol = match self.cells[row * 3 + col] {
                    Some(PlayerId(0)) => 'X',
                    Some(_) => 'O',
                    None => '.',
                };
                write!(f, "{symbol}")?;
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
