//! Power-up definitions.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CellIndex, Emoji};

/// The four power-up effects.
///
/// - `ExtraTurn`: the next turn advance is skipped once
/// - `SwapEmoji`: two opponent pieces trade cells
/// - `BlockCell`: an empty cell is unplayable for a few placements
/// - `PeekNext`: reveals the next few emojis the player will draw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    ExtraTurn,
    SwapEmoji,
    BlockCell,
    PeekNext,
}

impl PowerUpKind {
    /// All kinds in catalog order.
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::ExtraTurn,
        PowerUpKind::SwapEmoji,
        PowerUpKind::BlockCell,
        PowerUpKind::PeekNext,
    ];

    /// Number of target cells a use must name.
    #[must_use]
    pub const fn target_count(self) -> usize {
        match self {
            PowerUpKind::ExtraTurn | PowerUpKind::PeekNext => 0,
            PowerUpKind::BlockCell => 1,
            PowerUpKind::SwapEmoji => 2,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PowerUpKind::ExtraTurn => "Extra Turn",
            PowerUpKind::SwapEmoji => "Swap Emoji",
            PowerUpKind::BlockCell => "Block Cell",
            PowerUpKind::PeekNext => "Peek Next",
        }
    }
}

impl std::fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A pending power-up offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Turn count when the offer was made.
    pub offered_at: u32,
}

/// What a successful power-up use did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpOutcome {
    /// The current player will move again after their next placement.
    ExtraTurnGranted,

    /// Two opponent pieces traded cells.
    Swapped { cells: [CellIndex; 2] },

    /// A cell is blocked until the turn count reaches `expires_at`.
    Blocked { cell: CellIndex, expires_at: u32 },

    /// The next emojis the player will draw, in order.
    Peeked { emojis: Vec<Emoji> },
}

impl PowerUpOutcome {
    /// Cells the outcome touched.
    #[must_use]
    pub fn targets(&self) -> SmallVec<[CellIndex; 2]> {
        match self {
            PowerUpOutcome::Swapped { cells } => SmallVec::from_slice(cells),
            PowerUpOutcome::Blocked { cell, .. } => SmallVec::from_slice(&[*cell]),
            PowerUpOutcome::ExtraTurnGranted | PowerUpOutcome::Peeked { .. } => SmallVec::new(),
        }
    }
}
