//! # blink-tac-toe
//!
//! Rules engine for Blink Tac Toe: two-player tic-tac-toe where each player
//! keeps at most three pieces on the board, the oldest vanishing when a
//! fourth is placed, plus random power-ups that bend turn order, board
//! occupancy and what a player can see.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: all randomness comes from an injected
//!    [`RandomSource`]. Same seed, same game.
//!
//! 2. **Explicit lifecycle**: [`MatchSetup`] handles category selection and
//!    is the only way to get a [`Match`]. Placing a piece before setup is
//!    finished does not compile.
//!
//! 3. **Rejections, not panics**: every operation returns a [`Rejection`]
//!    for bad input. Panics are reserved for corrupt engine bookkeeping.
//!
//! ## Architecture
//!
//! - **Sequence-ordered eviction**: a global placement counter decides which
//!   piece is oldest. Swapping pieces moves them without changing that order.
//!
//! - **Event log**: every transition is appended to an `im::Vector` of
//!   [`MatchEvent`]s for the presentation layer.
//!
//! ## Modules
//!
//! - `core`: Players, board, state, events, RNG, configuration
//! - `rules`: Win detection, piece lifecycle, setup and the match engine
//! - `powerups`: Power-up kinds, catalog and effects
//! - `error`: Rejection reasons

pub mod core;
pub mod error;
pub mod powerups;
pub mod rules;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Board, CategoryCatalog, CategoryId, CellIndex, Emoji, EmojiCategory, GameRng, MatchConfig,
    MatchEvent, MatchRng, MatchState, MatchStats, MatchStatus, Placement, PlayerId, PlayerMap,
    RandomSource, RandomStream, RejectedUsePolicy, Sequence,
};

pub use crate::error::Rejection;

pub use crate::powerups::{PowerUp, PowerUpCatalog, PowerUpDefinition, PowerUpKind, PowerUpOutcome};

pub use crate::rules::{detect_winner, Match, MatchSetup, PlacementEvent, Win, WinningLine};
