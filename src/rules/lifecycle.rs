//! Piece lifecycle: placement, the piece cap, and oldest-first eviction.
//!
//! A player may hold at most `max_active_pieces` pieces on the board. Placing
//! one more removes their oldest piece (lowest sequence number) in the same
//! move. Eviction order follows sequence numbers only, never board position,
//! so a swapped piece keeps its place in the queue.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::win::{detect_winner, Win};
use crate::core::{CellIndex, Emoji, MatchEvent, MatchState, Placement, PlayerId};
use crate::error::Rejection;

/// What a successful placement did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementEvent {
    /// The piece was added; nothing else changed.
    Placed { placement: Placement },

    /// The piece was added and the player's oldest piece vanished.
    PlacedWithEviction {
        placement: Placement,
        evicted: Placement,
    },

    /// The piece completed a line.
    PlacedWithWin {
        placement: Placement,
        evicted: Option<Placement>,
        win: Win,
    },
}

impl PlacementEvent {
    /// The piece that was placed.
    #[must_use]
    pub fn placement(&self) -> &Placement {
        match self {
            PlacementEvent::Placed { placement }
            | PlacementEvent::PlacedWithEviction { placement, .. }
            | PlacementEvent::PlacedWithWin { placement, .. } => placement,
        }
    }

    /// The piece that vanished, if any.
    #[must_use]
    pub fn evicted(&self) -> Option<&Placement> {
        match self {
            PlacementEvent::Placed { .. } => None,
            PlacementEvent::PlacedWithEviction { evicted, .. } => Some(evicted),
            PlacementEvent::PlacedWithWin { evicted, .. } => evicted.as_ref(),
        }
    }

    /// The completed line, if any.
    #[must_use]
    pub fn win(&self) -> Option<Win> {
        match self {
            PlacementEvent::PlacedWithWin { win, .. } => Some(*win),
            _ => None,
        }
    }
}

/// Check whether `player` may place at `cell` without changing anything.
///
/// Checks, in order: the game is not over, the cell is not blocked, the cell
/// does not hold the piece this move would evict, the cell is empty.
pub fn check_placement(
    state: &MatchState,
    player: PlayerId,
    cell: CellIndex,
    max_active_pieces: usize,
) -> Result<(), Rejection> {
    if state.status().is_over() {
        return Err(Rejection::GameOver);
    }
    if state.blocked_cells().contains(cell) {
        return Err(Rejection::CellBlocked(cell));
    }

    let own = state.player(player);
    if own.active_placements().len() >= max_active_pieces
        && own.oldest().is_some_and(|oldest| oldest.position == cell)
    {
        return Err(Rejection::SelfEvictionConflict(cell));
    }

    if !state.board().is_empty_cell(cell) {
        return Err(Rejection::CellOccupied(cell));
    }
    Ok(())
}

/// Cells `player` could legally place on right now, in index order.
#[must_use]
pub fn legal_cells(state: &MatchState, player: PlayerId, max_active_pieces: usize) -> Vec<CellIndex> {
    CellIndex::all()
        .filter(|&cell| check_placement(state, player, cell, max_active_pieces).is_ok())
        .collect()
}

/// Place `emoji` for `player` at `cell`.
///
/// On success the turn count goes up by one, the player's oldest piece is
/// evicted if they were at the cap, and the board is checked for a win.
/// On rejection the state is untouched.
pub(crate) fn place_piece(
    state: &mut MatchState,
    player: PlayerId,
    cell: CellIndex,
    emoji: Emoji,
    max_active_pieces: usize,
) -> Result<PlacementEvent, Rejection> {
    check_placement(state, player, cell, max_active_pieces)?;

    let placement = Placement {
        emoji,
        owner: player,
        sequence: state.next_sequence(),
        position: cell,
    };

    let evicted = if state.players[player].active.len() >= max_active_pieces {
        let oldest = state.players[player].active.remove(0);
        let removed = state.board.take(oldest.position);
        assert_eq!(removed.as_ref(), Some(&oldest), "evicted piece was not on the board");
        debug!(%player, cell = %oldest.position, sequence = oldest.sequence.0, "evicted oldest piece");
        Some(oldest)
    } else {
        None
    };

    state.board.put(placement.clone());
    state.players[player].active.push(placement.clone());
    state.turn_count += 1;

    state.record(MatchEvent::Placed {
        placement: placement.clone(),
    });
    if let Some(evicted) = &evicted {
        state.record(MatchEvent::Evicted {
            placement: evicted.clone(),
        });
    }

    debug!(
        %player,
        %cell,
        emoji = %placement.emoji,
        turn = state.turn_count,
        "placed piece"
    );

    let event = match (detect_winner(&state.board), evicted) {
        (Some(win), evicted) => PlacementEvent::PlacedWithWin {
            placement,
            evicted,
            win,
        },
        (None, Some(evicted)) => PlacementEvent::PlacedWithEviction { placement, evicted },
        (None, None) => PlacementEvent::Placed { placement },
    };
    Ok(event)
}
