//! Power-ups: what can be offered, and what each one does.
//!
//! Power-ups are offered at random every few placements and spent by the
//! current player:
//! - `ExtraTurn`: keep the move after the next placement
//! - `SwapEmoji`: trade the cells of two opponent pieces
//! - `BlockCell`: make an empty cell unplayable for a while
//! - `PeekNext`: see the next emojis you will draw

pub mod power_up;
pub mod catalog;
pub(crate) mod resolver;

pub use power_up::{PowerUp, PowerUpKind, PowerUpOutcome};
pub use catalog::{PowerUpCatalog, PowerUpDefinition};
pub(crate) use resolver::PowerUpResolver;
