//! The match state machine.
//!
//! `Match` owns the configuration, the state and the random source, and is
//! the only way to change a running game:
//! - `attempt_place`: place the current emoji for the current player
//! - `use_power_up`: spend the pending power-up
//! - `reset_board`: start a new board, keeping scores and categories
//! - `restart`: go back to category selection
//!
//! ## Placement flow
//!
//! 1. Place the piece, evicting the mover's oldest if they are at the cap
//! 2. Expire blocked cells whose time is up
//! 3. On a win: record it, bump the winner's score, stop
//! 4. Otherwise pass the turn (or spend a pending extra turn), draw the
//!    next emoji, and roll for a power-up offer
//!
//! Every mutation ends with `MatchState::assert_integrity`.

use tracing::{debug, info};

use super::lifecycle::{self, PlacementEvent};
use super::setup::MatchSetup;
use super::win::WinningLine;
use crate::core::{
    Board, BlockedCells, CategoryId, CellIndex, Emoji, EmojiCategory, MatchConfig, MatchEvent,
    MatchRng, MatchState, MatchStats, MatchStatus, PlayerId, PlayerMap, RandomSource,
};
use crate::error::Rejection;
use crate::powerups::{PowerUp, PowerUpKind, PowerUpOutcome, PowerUpResolver};

/// A running match.
///
/// ```
/// use blink_tac_toe::core::{standard, CellIndex, MatchConfig, PlayerId};
/// use blink_tac_toe::rules::Match;
///
/// let mut game = Match::seeded(MatchConfig::default(), standard::ANIMALS, standard::FOOD, 42).unwrap();
///
/// game.attempt_place(CellIndex::new(4).unwrap()).unwrap();
/// assert_eq!(game.current_player(), PlayerId::TWO);
/// assert_eq!(game.turn_count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Match<R: RandomSource = MatchRng> {
    config: MatchConfig,
    categories: PlayerMap<EmojiCategory>,
    state: MatchState,
    rng: R,
}

impl Match<MatchRng> {
    /// Start a match with the default random source.
    pub fn seeded(
        config: MatchConfig,
        first: CategoryId,
        second: CategoryId,
        seed: u64,
    ) -> Result<Self, Rejection> {
        Self::start(config, first, second, MatchRng::new(seed))
    }
}

impl<R: RandomSource> Match<R> {
    /// Run category selection and start the match in one step.
    pub fn start(
        config: MatchConfig,
        first: CategoryId,
        second: CategoryId,
        rng: R,
    ) -> Result<Self, Rejection> {
        let mut setup = MatchSetup::new(config, rng);
        setup.choose_category(PlayerId::ONE, first)?;
        setup.choose_category(PlayerId::TWO, second)?;
        setup.start()
    }

    /// Enter play with resolved categories and the session's running
    /// stats. Player one moves first.
    pub(crate) fn begin(
        config: MatchConfig,
        categories: PlayerMap<EmojiCategory>,
        stats: MatchStats,
        mut rng: R,
    ) -> Self {
        let mut state = MatchState::new(
            categories.map(|c| c.id),
            Emoji::new(""),
            PlayerMap::with_default(),
        );
        state.stats = stats;
        for player in PlayerId::both() {
            state.fill_upcoming(player, &categories[player], config.peek_depth(), &mut rng);
        }
        state.draw_current_emoji(&categories[PlayerId::ONE], config.peek_depth(), &mut rng);

        info!(
            first = %categories[PlayerId::ONE].name,
            second = %categories[PlayerId::TWO].name,
            "match started"
        );

        let game = Self {
            config,
            categories,
            state,
            rng,
        };
        game.state.assert_integrity(game.config.piece_cap());
        game
    }

    // === Operations ===

    /// Place the current emoji for the current player.
    ///
    /// On rejection nothing changes.
    pub fn attempt_place(&mut self, cell: CellIndex) -> Result<PlacementEvent, Rejection> {
        let player = self.state.current_player;
        let cap = self.config.piece_cap();
        let emoji = self.state.current_emoji.clone();

        let event = lifecycle::place_piece(&mut self.state, player, cell, emoji, cap).map_err(
            |rejection| {
                debug!(%player, %cell, %rejection, "placement rejected");
                rejection
            },
        )?;
        self.state.stats.moves_played += 1;

        for freed in self.state.blocked.expire(self.state.turn_count) {
            debug!(cell = %freed, "cell unblocked");
            self.state.record(MatchEvent::CellUnblocked { cell: freed });
        }

        if self.state.peek == Some(player) {
            self.state.peek = None;
        }

        if let Some(win) = event.win() {
            self.state.status = MatchStatus::Completed {
                winner: win.winner,
                line: win.line,
            };
            self.state.players[win.winner].score += 1;
            self.state.stats.games_completed += 1;
            self.state.record(MatchEvent::Won {
                winner: win.winner,
                line: win.line,
            });
            info!(
                winner = %win.winner,
                line = ?win.line.indices(),
                score = self.state.players[win.winner].score,
                "board won"
            );
        } else {
            self.advance_turn(player);
            PowerUpResolver::maybe_offer(&mut self.state, &self.config, &mut self.rng);
        }

        self.state.assert_integrity(cap);
        Ok(event)
    }

    /// Place by raw cell index.
    pub fn attempt_place_at(&mut self, index: usize) -> Result<PlacementEvent, Rejection> {
        self.attempt_place(CellIndex::try_from(index)?)
    }

    /// Spend the pending power-up for the current player.
    ///
    /// `targets` must hold as many cells as the kind needs: two for
    /// `SwapEmoji`, one for `BlockCell`, none otherwise.
    pub fn use_power_up(
        &mut self,
        kind: PowerUpKind,
        targets: &[CellIndex],
    ) -> Result<PowerUpOutcome, Rejection> {
        let outcome = PowerUpResolver::resolve(
            &mut self.state,
            &self.config,
            &self.categories,
            &mut self.rng,
            kind,
            targets,
        );
        self.state.assert_integrity(self.config.piece_cap());
        outcome
    }

    /// Clear the board for another game. Scores, categories and stats carry
    /// over; player one moves first.
    pub fn reset_board(&mut self) {
        self.state.reset_board();
        self.state.draw_current_emoji(
            &self.categories[PlayerId::ONE],
            self.config.peek_depth(),
            &mut self.rng,
        );
        self.state.assert_integrity(self.config.piece_cap());
        info!(scores = ?self.state.scores(), "board reset");
    }

    /// Abandon the match and return to category selection. Scores and
    /// categories are dropped; session stats carry over.
    #[must_use]
    pub fn restart(self) -> MatchSetup<R> {
        info!(stats = ?self.state.stats, "match restarted");
        MatchSetup::resume(self.config, self.rng, self.state.stats)
    }

    fn advance_turn(&mut self, mover: PlayerId) {
        if self.state.extra_turn {
            self.state.extra_turn = false;
            self.state.record(MatchEvent::ExtraTurnUsed { player: mover });
            debug!(player = %mover, "extra turn used");
        } else {
            let next = mover.opponent();
            self.state.current_player = next;
            self.state.record(MatchEvent::TurnPassed { to: next });
        }
        let current = self.state.current_player;
        self.state
            .draw_current_emoji(&self.categories[current], self.config.peek_depth(), &mut self.rng);
    }

    // === Projections ===

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The random source driving this match.
    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// The category a player is drawing from.
    #[must_use]
    pub fn category(&self, player: PlayerId) -> &EmojiCategory {
        &self.categories[player]
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    #[must_use]
    pub fn current_emoji(&self) -> &Emoji {
        self.state.current_emoji()
    }

    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.state.turn_count()
    }

    #[must_use]
    pub fn status(&self) -> MatchStatus {
        self.state.status()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner()
    }

    #[must_use]
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.state.winning_line()
    }

    /// Scores as (player one, player two).
    #[must_use]
    pub fn scores(&self) -> (u32, u32) {
        self.state.scores()
    }

    #[must_use]
    pub fn blocked_cells(&self) -> &BlockedCells {
        self.state.blocked_cells()
    }

    #[must_use]
    pub fn pending_power_up(&self) -> Option<&PowerUp> {
        self.state.pending_power_up()
    }

    #[must_use]
    pub fn peeked_emojis(&self, player: PlayerId) -> Option<Vec<Emoji>> {
        self.state.peeked_emojis(player)
    }

    #[must_use]
    pub fn stats(&self) -> MatchStats {
        self.state.stats()
    }

    /// Event log since the board was last reset.
    #[must_use]
    pub fn events(&self) -> &im::Vector<MatchEvent> {
        self.state.events()
    }

    /// Cells the current player could place on right now.
    #[must_use]
    pub fn legal_cells(&self) -> Vec<CellIndex> {
        lifecycle::legal_cells(
            &self.state,
            self.state.current_player,
            self.config.piece_cap(),
        )
    }

    /// Would placing at `cell` succeed right now?
    pub fn check_placement(&self, cell: CellIndex) -> Result<(), Rejection> {
        lifecycle::check_placement(
            &self.state,
            self.state.current_player,
            cell,
            self.config.piece_cap(),
        )
    }
}
