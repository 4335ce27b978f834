//! Core type bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{CellIndex, PlayerId};
use crate::error::Rejection;
use crate::powerups::PowerUpKind;

impl From<Rejection> for PyErr {
    fn from(rejection: Rejection) -> Self {
        PyValueError::new_err(rejection.to_string())
    }
}

/// Python wrapper for PlayerId.
#[pyclass(name = "PlayerId")]
#[derive(Clone, Debug)]
pub struct PyPlayerId(pub PlayerId);

#[pymethods]
impl PyPlayerId {
    /// Create a player ID from 1 or 2.
    #[new]
    fn new(id: u8) -> PyResult<Self> {
        PlayerId::new(id)
            .map(Self)
            .ok_or_else(|| PyValueError::new_err(format!("player id must be 1 or 2, got {id}")))
    }

    /// Get the raw ID value.
    #[getter]
    fn id(&self) -> u8 {
        self.0.raw()
    }

    fn opponent(&self) -> Self {
        Self(self.0.opponent())
    }

    fn __repr__(&self) -> String {
        format!("PlayerId({})", self.0.raw())
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        u64::from(self.0.raw())
    }
}

/// Parse a power-up name such as "Swap Emoji" or "swap_emoji".
pub(crate) fn parse_power_up(name: &str) -> PyResult<PowerUpKind> {
    let wanted = name.replace('_', " ");
    PowerUpKind::ALL
        .into_iter()
        .find(|kind| kind.name().eq_ignore_ascii_case(&wanted))
        .ok_or_else(|| PyValueError::new_err(format!("unknown power-up: {name}")))
}

pub(crate) fn to_cells(indices: &[usize]) -> PyResult<Vec<CellIndex>> {
    indices
        .iter()
        .map(|&i| CellIndex::try_from(i).map_err(PyErr::from))
        .collect()
}

pub(crate) fn to_player(id: u8) -> PyResult<PlayerId> {
    PlayerId::new(id).ok_or_else(|| PyValueError::new_err(format!("player id must be 1 or 2, got {id}")))
}
