//! Match bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{CategoryId, MatchConfig, MatchRng, PlayerId};
use crate::powerups::PowerUpOutcome;
use crate::rules::{Match, MatchSetup};

use super::py_core::{parse_power_up, to_cells, to_player, PyPlayerId};

/// Python wrapper for a running match.
///
/// Cells are indexed 0-8, row by row. Rejected moves raise `ValueError`
/// with the reason.
#[pyclass(name = "Match")]
pub struct PyMatch {
    game: Match<MatchRng>,
}

fn category_named(config: &MatchConfig, name: &str) -> PyResult<CategoryId> {
    config
        .categories
        .find_by_name(name)
        .ok_or_else(|| PyValueError::new_err(format!("unknown category: {name}")))
}

fn start(mut setup: MatchSetup<MatchRng>, first: &str, second: &str) -> PyResult<Match<MatchRng>> {
    let first = category_named(setup.config(), first)?;
    let second = category_named(setup.config(), second)?;
    setup.choose_category(PlayerId::ONE, first)?;
    setup.choose_category(PlayerId::TWO, second)?;
    Ok(setup.start()?)
}

#[pymethods]
impl PyMatch {
    /// Start a match with the standard rules.
    ///
    /// # Arguments
    /// - first: Player one's category name (e.g. "animals")
    /// - second: Player two's category name
    /// - seed: RNG seed for deterministic games
    #[new]
    #[pyo3(signature = (first, second, seed = 42))]
    fn new(first: &str, second: &str, seed: u64) -> PyResult<Self> {
        let setup = MatchSetup::seeded(MatchConfig::default(), seed);
        Ok(Self {
            game: start(setup, first, second)?,
        })
    }

    /// Place the current emoji at a cell.
    ///
    /// Returns the cell of the evicted piece, if one vanished.
    fn place(&mut self, cell: usize) -> PyResult<Option<usize>> {
        let event = self.game.attempt_place_at(cell)?;
        Ok(event.evicted().map(|p| p.position.get()))
    }

    /// Spend the pending power-up.
    ///
    /// Returns the revealed emojis for "Peek Next", otherwise None.
    #[pyo3(signature = (kind, targets = Vec::new()))]
    fn use_power_up(&mut self, kind: &str, targets: Vec<usize>) -> PyResult<Option<Vec<String>>> {
        let kind = parse_power_up(kind)?;
        let targets = to_cells(&targets)?;
        let outcome = self.game.use_power_up(kind, &targets)?;
        Ok(match outcome {
            PowerUpOutcome::Peeked { emojis } => {
                Some(emojis.iter().map(|e| e.as_str().to_owned()).collect())
            }
            _ => None,
        })
    }

    /// Clear the board, keeping scores.
    fn reset_board(&mut self) {
        self.game.reset_board();
    }

    /// Start over with new categories. Scores are cleared.
    fn restart(&mut self, first: &str, second: &str) -> PyResult<()> {
        let setup = self.game.clone().restart();
        self.game = start(setup, first, second)?;
        Ok(())
    }

    /// Get the player whose turn it is.
    #[getter]
    fn current_player(&self) -> PyPlayerId {
        PyPlayerId(self.game.current_player())
    }

    /// Get the emoji the current player will place.
    #[getter]
    fn current_emoji(&self) -> String {
        self.game.current_emoji().as_str().to_owned()
    }

    #[getter]
    fn turn_count(&self) -> u32 {
        self.game.turn_count()
    }

    /// Get (player one, player two) scores.
    #[getter]
    fn scores(&self) -> (u32, u32) {
        self.game.scores()
    }

    /// Get the board as nine entries of (emoji, owner) or None.
    #[getter]
    fn board(&self) -> Vec<Option<(String, u8)>> {
        crate::core::CellIndex::all()
            .map(|cell| {
                self.game
                    .board()
                    .get(cell)
                    .map(|p| (p.emoji.as_str().to_owned(), p.owner.raw()))
            })
            .collect()
    }

    #[getter]
    fn blocked_cells(&self) -> Vec<usize> {
        self.game.blocked_cells().cells().into_iter().map(|c| c.get()).collect()
    }

    /// Get the name of the pending power-up, if any.
    #[getter]
    fn pending_power_up(&self) -> Option<&'static str> {
        self.game.pending_power_up().map(|p| p.kind.name())
    }

    #[getter]
    fn winner(&self) -> Option<PyPlayerId> {
        self.game.winner().map(PyPlayerId)
    }

    #[getter]
    fn winning_line(&self) -> Option<[usize; 3]> {
        self.game.winning_line().map(|line| line.indices())
    }

    /// Cells the current player may place on.
    fn legal_cells(&self) -> Vec<usize> {
        self.game.legal_cells().into_iter().map(|c| c.get()).collect()
    }

    /// Upcoming emojis for a player with an active peek.
    fn peeked_emojis(&self, player: u8) -> PyResult<Option<Vec<String>>> {
        let player = to_player(player)?;
        Ok(self
            .game
            .peeked_emojis(player)
            .map(|emojis| emojis.iter().map(|e| e.as_str().to_owned()).collect()))
    }

    fn __repr__(&self) -> String {
        format!(
            "Match(turn={}, current={}, scores={:?})",
            self.game.turn_count(),
            self.game.current_player(),
            self.game.scores()
        )
    }
}
