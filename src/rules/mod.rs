//! Game rules: win detection, piece lifecycle, and the match state machine.
//!
//! - `win`: the eight lines and how a completed one is found
//! - `lifecycle`: placement legality, the piece cap and eviction
//! - `setup`: category selection before play
//! - `engine`: `Match`, which runs a game from first move to reset
//!
//! Callers drive a game through `Match`; the free functions here are
//! read-only helpers over `MatchState`.

pub mod win;
pub mod lifecycle;
pub mod setup;
pub mod engine;

pub use win::{detect_winner, Win, WinningLine, WINNING_LINES};
pub use lifecycle::{check_placement, legal_cells, PlacementEvent};
pub use setup::MatchSetup;
pub use engine::Match;
