//! Python bindings for the Blink Tac Toe engine.
//!
//! # Quick Start
//!
//! ```python
//! import blink_tac_toe as btt
//!
//! game = btt.Match("animals", "food", seed=42)
//! game.place(4)
//! print(game.board, game.current_player)
//!
//! if game.pending_power_up == "Block Cell":
//!     game.use_power_up("block_cell", [0])
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_match;

pub use py_core::*;
pub use py_match::*;

/// blink_tac_toe: vanishing-piece tic-tac-toe with power-ups.
#[pymodule]
fn blink_tac_toe(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPlayerId>()?;
    m.add_class::<PyMatch>()?;
    Ok(())
}
