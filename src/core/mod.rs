//! Core engine types: players, board, state, events, RNG, configuration.
//!
//! This module holds the data model. Rules that change it live in `rules`
//! and `powerups`.

pub mod player;
pub mod board;
pub mod rng;
pub mod config;
pub mod event;
pub mod state;

pub use player::{PlayerId, PlayerMap};
pub use board::{Board, CellIndex, Emoji, Placement, Sequence, CELL_COUNT};
pub use rng::{GameRng, MatchRng, RandomSource, RandomStream};
pub use config::{
    standard, CatalogError, CategoryCatalog, CategoryId, EmojiCategory, MatchConfig,
    RejectedUsePolicy, MAX_PEEK_COUNT,
};
pub use event::MatchEvent;
pub use state::{BlockedCells, MatchState, MatchStats, MatchStatus, PlayerState};
