//! Rejections returned by engine operations.
//!
//! Every variant is an expected, recoverable outcome of user input. The
//! engine never panics on misuse; it only panics when its own bookkeeping is
//! corrupt (see `MatchState::assert_integrity`).

use thiserror::Error;

use crate::core::{CategoryId, CellIndex, PlayerId};
use crate::powerups::PowerUpKind;

/// Why an operation was refused. The match state is unchanged by a rejected
/// placement; a rejected power-up use may still consume the offer depending
/// on `RejectedUsePolicy`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{0} is already occupied")]
    CellOccupied(CellIndex),

    #[error("{0} is blocked")]
    CellBlocked(CellIndex),

    #[error("{0} holds the piece this move would remove")]
    SelfEvictionConflict(CellIndex),

    #[error("the game is over")]
    GameOver,

    #[error("{0} is not an opponent piece that can be swapped")]
    InvalidSwapTarget(CellIndex),

    #[error("{0} is not empty")]
    CellNotEmpty(CellIndex),

    #[error("no power-up is pending")]
    NoPendingPowerUp,

    #[error("{kind} needs {expected} target cell(s), got {actual}")]
    InvalidPowerUpTargetCount {
        kind: PowerUpKind,
        expected: usize,
        actual: usize,
    },

    #[error("pending power-up is {offered}, not {requested}")]
    PowerUpMismatch {
        offered: PowerUpKind,
        requested: PowerUpKind,
    },

    #[error("cell index {0} is out of range")]
    CellOutOfRange(usize),

    #[error("both players chose category {0}")]
    DuplicateCategory(CategoryId),

    #[error("unknown category {0}")]
    UnknownCategory(CategoryId),

    #[error("{0} has not chosen a category")]
    MissingCategory(PlayerId),
}
