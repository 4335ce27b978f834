//! The 3×3 board, its cells, and the placements that occupy them.
//!
//! Cells are indexed 0-8 in row-major order:
//!
//! ```text
//!  0 | 1 | 2
//! ---+---+---
//!  3 | 4 | 5
//! ---+---+---
//!  6 | 7 | 8
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::error::Rejection;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Index of a board cell. Always in `0..9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct CellIndex(u8);

impl CellIndex {
    /// Create a cell index, or `None` if out of range.
    #[must_use]
    pub const fn new(index: usize) -> Option<Self> {
        if index < CELL_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Get the raw index.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// Row of this cell (0-2).
    #[must_use]
    pub const fn row(self) -> usize {
        self.get() / 3
    }

    /// Column of this cell (0-2).
    #[must_use]
    pub const fn col(self) -> usize {
        self.get() % 3
    }

    /// All nine cells in index order.
    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..CELL_COUNT as u8).map(CellIndex)
    }
}

impl TryFrom<usize> for CellIndex {
    type Error = Rejection;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index).ok_or(Rejection::CellOutOfRange(index))
    }
}

impl From<CellIndex> for usize {
    fn from(cell: CellIndex) -> Self {
        cell.get()
    }
}

impl std::fmt::Display for CellIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cell {}", self.0)
    }
}

/// An emoji symbol drawn from a category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Emoji(String);

impl Emoji {
    /// Wrap a symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// The symbol text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Emoji {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Global placement counter value. Strictly increasing across the match,
/// so comparing two sequences tells which piece is older.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Sequence(pub u64);

/// A piece on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Symbol shown for this piece.
    pub emoji: Emoji,
    /// Player who placed it.
    pub owner: PlayerId,
    /// Placement order; lower is older.
    pub sequence: Sequence,
    /// Cell currently holding the piece.
    pub position: CellIndex,
}

/// Board occupancy. Each cell holds at most one placement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Placement>; CELL_COUNT],
}

impl Board {
    /// An empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The placement at a cell, if any.
    #[must_use]
    pub fn get(&self, cell: CellIndex) -> Option<&Placement> {
        self.cells[cell.get()].as_ref()
    }

    /// Owner of the piece at a cell, if any.
    #[must_use]
    pub fn owner_at(&self, cell: CellIndex) -> Option<PlayerId> {
        self.get(cell).map(|p| p.owner)
    }

    /// Check if a cell is empty.
    #[must_use]
    pub fn is_empty_cell(&self, cell: CellIndex) -> bool {
        self.cells[cell.get()].is_none()
    }

    /// Iterate over occupied cells.
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.cells.iter().flatten()
    }

    /// Iterate over empty cells.
    pub fn empty_cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        CellIndex::all().filter(|&cell| self.is_empty_cell(cell))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.placements().count()
    }

    /// Put a placement on its own position. The cell must be empty.
    pub(crate) fn put(&mut self, placement: Placement) {
        let slot = &mut self.cells[placement.position.get()];
        assert!(slot.is_none(), "{} is already occupied", placement.position);
        *slot = Some(placement);
    }

    /// Remove and return whatever occupies a cell.
    pub(crate) fn take(&mut self, cell: CellIndex) -> Option<Placement> {
        self.cells[cell.get()].take()
    }

    /// Swap the contents of two cells, keeping each placement's
    /// `position` in step with its new cell.
    pub(crate) fn swap(&mut self, a: CellIndex, b: CellIndex) {
        self.cells.swap(a.get(), b.get());
        for cell in [a, b] {
            if let Some(placement) = self.cells[cell.get()].as_mut() {
                placement.position = cell;
            }
        }
    }

    /// Remove every placement.
    pub(crate) fn clear(&mut self) {
        self.cells = Default::default();
    }
}
