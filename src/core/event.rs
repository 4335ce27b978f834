//! State transitions recorded for the presentation layer.
//!
//! The engine appends one `MatchEvent` per observable change. Renderers read
//! the log to drive sounds, toasts and animations without re-deriving what
//! happened from board diffs.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::board::{CellIndex, Placement};
use super::player::PlayerId;
use crate::powerups::PowerUpKind;
use crate::rules::WinningLine;

/// A single recorded state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A piece was put on the board.
    Placed { placement: Placement },

    /// A piece vanished because its owner placed one too many.
    Evicted { placement: Placement },

    /// A line was completed.
    Won { winner: PlayerId, line: WinningLine },

    /// The move passed to the other player.
    TurnPassed { to: PlayerId },

    /// An extra turn was spent; the same player moves again.
    ExtraTurnUsed { player: PlayerId },

    /// A blocked cell became playable again.
    CellUnblocked { cell: CellIndex },

    /// A power-up was offered.
    PowerUpOffered { kind: PowerUpKind, turn: u32 },

    /// A power-up took effect.
    PowerUpUsed {
        player: PlayerId,
        kind: PowerUpKind,
        targets: SmallVec<[CellIndex; 2]>,
    },

    /// A power-up use was rejected and the offer was spent anyway.
    PowerUpForfeited { player: PlayerId, kind: PowerUpKind },
}
