//! Win detection.

use serde::{Deserialize, Serialize};

use crate::core::{Board, CellIndex, PlayerId};

/// The eight winning lines, in the order they are checked: rows, then
/// columns, then diagonals. When several lines are complete at once, the
/// first in this order is reported.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Three cells in a row, column or diagonal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine(pub [CellIndex; 3]);

impl WinningLine {
    /// The cells of this line.
    #[must_use]
    pub fn cells(&self) -> [CellIndex; 3] {
        self.0
    }

    /// Raw cell indices of this line.
    #[must_use]
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(CellIndex::get)
    }

    /// Check whether a cell is part of this line.
    #[must_use]
    pub fn contains(&self, cell: CellIndex) -> bool {
        self.0.contains(&cell)
    }

    fn from_indices(indices: [usize; 3]) -> Option<Self> {
        Some(Self([
            CellIndex::new(indices[0])?,
            CellIndex::new(indices[1])?,
            CellIndex::new(indices[2])?,
        ]))
    }
}

/// A completed line and who owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Win {
    pub winner: PlayerId,
    pub line: WinningLine,
}

/// Find the first completed line on the board.
///
/// A line is complete when all three cells hold pieces of the same owner.
///
/// ```
/// use blink_tac_toe::core::Board;
/// use blink_tac_toe::rules::detect_winner;
///
/// assert_eq!(detect_winner(&Board::new()), None);
/// ```
#[must_use]
pub fn detect_winner(board: &Board) -> Option<Win> {
    WINNING_LINES.iter().find_map(|&indices| {
        let line = WinningLine::from_indices(indices)?;
        let [a, b, c] = line.cells();
        let owner = board.owner_at(a)?;
        (board.owner_at(b) == Some(owner) && board.owner_at(c) == Some(owner))
            .then_some(Win { winner: owner, line })
    })
}
