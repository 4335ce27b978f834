//! Match state.
//!
//! ## PlayerState
//!
//! Per-player data: chosen category, score, and the ordered list of active
//! placements (oldest first).
//!
//! ## MatchState
//!
//! Everything a match needs between moves:
//! - Board and both players' active placements
//! - Whose turn it is, which emoji they hold, and how many placements so far
//! - Match status (in progress or completed with a winning line)
//! - Power-up bookkeeping: pending offer, extra-turn flag, blocked cells,
//!   peek grant
//! - Upcoming emoji queues, session stats, and the event log
//!
//! Only the engine mutates a `MatchState`. Callers get `&MatchState` and use
//! the read-only accessors below.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;

use super::board::{Board, CellIndex, Emoji, Placement, Sequence};
use super::config::{CategoryId, EmojiCategory};
use super::event::MatchEvent;
use super::player::{PlayerId, PlayerMap};
use super::rng::{RandomSource, RandomStream};
use crate::powerups::PowerUp;
use crate::rules::{Win, WinningLine};

/// A player's side of the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    id: PlayerId,
    category: CategoryId,
    pub(crate) active: SmallVec<[Placement; 3]>,
    pub(crate) score: u32,
}

impl PlayerState {
    fn new(id: PlayerId, category: CategoryId) -> Self {
        Self {
            id,
            category,
            active: SmallVec::new(),
            score: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn category(&self) -> CategoryId {
        self.category
    }

    /// Active placements, oldest first.
    #[must_use]
    pub fn active_placements(&self) -> &[Placement] {
        &self.active
    }

    /// The piece that will vanish next.
    #[must_use]
    pub fn oldest(&self) -> Option<&Placement> {
        self.active.first()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }
}

/// Whether the board is still being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    InProgress,
    Completed { winner: PlayerId, line: WinningLine },
}

impl MatchStatus {
    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self, MatchStatus::Completed { .. })
    }

    #[must_use]
    pub fn win(&self) -> Option<Win> {
        match *self {
            MatchStatus::InProgress => None,
            MatchStatus::Completed { winner, line } => Some(Win { winner, line }),
        }
    }
}

/// Cells that cannot be played until a given turn count.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedCells {
    expiries: FxHashMap<CellIndex, u32>,
}

impl BlockedCells {
    #[must_use]
    pub fn contains(&self, cell: CellIndex) -> bool {
        self.expiries.contains_key(&cell)
    }

    /// Turn count at which a blocked cell opens again.
    #[must_use]
    pub fn expiry(&self, cell: CellIndex) -> Option<u32> {
        self.expiries.get(&cell).copied()
    }

    /// Blocked cells in index order.
    #[must_use]
    pub fn cells(&self) -> Vec<CellIndex> {
        let mut cells: Vec<_> = self.expiries.keys().copied().collect();
        cells.sort_unstable();
        cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expiries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expiries.is_empty()
    }

    pub(crate) fn insert(&mut self, cell: CellIndex, expires_at: u32) {
        self.expiries.insert(cell, expires_at);
    }

    /// Remove every entry whose expiry has been reached, returning the
    /// freed cells in index order.
    pub(crate) fn expire(&mut self, turn_count: u32) -> Vec<CellIndex> {
        let mut freed: Vec<_> = self
            .expiries
            .iter()
            .filter(|(_, expires_at)| **expires_at <= turn_count)
            .map(|(&cell, _)| cell)
            .collect();
        freed.sort_unstable();
        for cell in &freed {
            self.expiries.remove(cell);
        }
        freed
    }

    pub(crate) fn clear(&mut self) {
        self.expiries.clear();
    }
}

/// Running totals kept across board resets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    /// Boards that ended with a winner.
    pub games_completed: u32,
    /// Successful placements.
    pub moves_played: u32,
    /// Offers spent, whether the use took effect or was forfeited by a
    /// rejection.
    pub power_ups_used: u32,
}

/// Full match state.
///
/// Cloning is cheap: the event log is an `im::Vector`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) board: Board,
    pub(crate) players: PlayerMap<PlayerState>,
    pub(crate) current_player: PlayerId,
    pub(crate) current_emoji: Emoji,
    pub(crate) turn_count: u32,
    pub(crate) next_sequence: u64,
    pub(crate) status: MatchStatus,
    pub(crate) pending_power_up: Option<PowerUp>,
    pub(crate) offer_checked_at: Option<u32>,
    pub(crate) extra_turn: bool,
    pub(crate) blocked: BlockedCells,
    pub(crate) peek: Option<PlayerId>,
    pub(crate) upcoming: PlayerMap<VecDeque<Emoji>>,
    pub(crate) stats: MatchStats,
    pub(crate) events: Vector<MatchEvent>,
}

impl MatchState {
    /// Fresh state: empty board, player one to move holding `first_emoji`.
    pub(crate) fn new(
        categories: PlayerMap<CategoryId>,
        first_emoji: Emoji,
        upcoming: PlayerMap<VecDeque<Emoji>>,
    ) -> Self {
        Self {
            board: Board::new(),
            players: PlayerMap::new(|p| PlayerState::new(p, categories[p])),
            current_player: PlayerId::ONE,
            current_emoji: first_emoji,
            turn_count: 0,
            next_sequence: 0,
            status: MatchStatus::InProgress,
            pending_power_up: None,
            offer_checked_at: None,
            extra_turn: false,
            blocked: BlockedCells::default(),
            peek: None,
            upcoming,
            stats: MatchStats::default(),
            events: Vector::new(),
        }
    }

    // === Projections ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Emoji the current player will place next.
    #[must_use]
    pub fn current_emoji(&self) -> &Emoji {
        &self.current_emoji
    }

    /// Successful placements since the board was last reset.
    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    #[must_use]
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.status.win().map(|w| w.winner)
    }

    #[must_use]
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.status.win().map(|w| w.line)
    }

    /// Scores as (player one, player two).
    #[must_use]
    pub fn scores(&self) -> (u32, u32) {
        (
            self.players[PlayerId::ONE].score,
            self.players[PlayerId::TWO].score,
        )
    }

    #[must_use]
    pub fn pending_power_up(&self) -> Option<&PowerUp> {
        self.pending_power_up.as_ref()
    }

    /// True while an Extra Turn is waiting to be spent.
    #[must_use]
    pub fn extra_turn_pending(&self) -> bool {
        self.extra_turn
    }

    #[must_use]
    pub fn blocked_cells(&self) -> &BlockedCells {
        &self.blocked
    }

    /// Upcoming emojis for `player`, if they have an active Peek Next.
    #[must_use]
    pub fn peeked_emojis(&self, player: PlayerId) -> Option<Vec<Emoji>> {
        (self.peek == Some(player)).then(|| self.upcoming[player].iter().cloned().collect())
    }

    #[must_use]
    pub fn stats(&self) -> MatchStats {
        self.stats
    }

    /// Event log since the board was last reset.
    #[must_use]
    pub fn events(&self) -> &Vector<MatchEvent> {
        &self.events
    }

    // === Engine-only mutation ===

    pub(crate) fn record(&mut self, event: MatchEvent) {
        self.events.push_back(event);
    }

    pub(crate) fn next_sequence(&mut self) -> Sequence {
        let seq = Sequence(self.next_sequence);
        self.next_sequence += 1;
        seq
    }

    /// Top up `player`'s upcoming queue to `depth` entries.
    pub(crate) fn fill_upcoming<R: RandomSource>(
        &mut self,
        player: PlayerId,
        category: &EmojiCategory,
        depth: usize,
        rng: &mut R,
    ) {
        let queue = &mut self.upcoming[player];
        while queue.len() < depth {
            let index = rng.pick(RandomStream::Emoji, category.emojis.len());
            queue.push_back(category.emojis[index].clone());
        }
    }

    /// Hand the current player their next emoji from the front of their
    /// queue, then refill the queue to `depth`.
    pub(crate) fn draw_current_emoji<R: RandomSource>(
        &mut self,
        category: &EmojiCategory,
        depth: usize,
        rng: &mut R,
    ) {
        let player = self.current_player;
        self.fill_upcoming(player, category, depth.saturating_add(1), rng);
        if let Some(emoji) = self.upcoming[player].pop_front() {
            self.current_emoji = emoji;
        }
    }

    /// Clear the board for a new game, keeping scores, categories, stats,
    /// upcoming queues and the sequence counter.
    pub(crate) fn reset_board(&mut self) {
        self.board.clear();
        for (_, player) in self.players.iter_mut() {
            player.active.clear();
        }
        self.current_player = PlayerId::ONE;
        self.turn_count = 0;
        self.status = MatchStatus::InProgress;
        self.pending_power_up = None;
        self.offer_checked_at = None;
        self.extra_turn = false;
        self.blocked.clear();
        self.peek = None;
        self.events = Vector::new();
    }

    /// Panic if the board and the active lists disagree.
    ///
    /// Checked after every mutation. A failure means engine bookkeeping is
    /// corrupt, which no caller input can cause.
    pub fn assert_integrity(&self, max_active_pieces: usize) {
        let mut listed = 0;
        for (id, player) in self.players.iter() {
            assert!(
                player.active.len() <= max_active_pieces,
                "{} has {} active pieces (cap {})",
                id,
                player.active.len(),
                max_active_pieces
            );
            for pair in player.active.windows(2) {
                assert!(
                    pair[0].sequence < pair[1].sequence,
                    "{} active pieces are out of order",
                    id
                );
            }
            for placement in &player.active {
                assert_eq!(placement.owner, id, "{} lists a piece it does not own", id);
                assert_eq!(
                    self.board.get(placement.position),
                    Some(placement),
                    "{} piece at {} is missing from the board",
                    id,
                    placement.position
                );
            }
            listed += player.active.len();
        }
        assert_eq!(
            self.board.occupied_count(),
            listed,
            "board holds pieces no player lists"
        );
        for cell in self.blocked.cells() {
            assert!(self.board.is_empty_cell(cell), "blocked {} is occupied", cell);
        }
    }
}
