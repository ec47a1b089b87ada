//! Cell types - a single automaton unit with a double-buffered state.
//!
//! A cell carries its committed `state` (what the renderer sees) and a
//! `pending` state written during the queue pass of a generation. The two
//! only meet in `commit`.

use serde::{Deserialize, Serialize};

/// Binary state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, CellState::Alive)
    }

    /// The opposite state.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}

/// A single cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    column: usize,
    row: usize,
    state: CellState,
    pending: CellState,
}

impl Cell {
    /// Create a dead cell at the given position.
    pub fn new(column: usize, row: usize) -> Self {
        Self {
            column,
            row,
            state: CellState::Dead,
            pending: CellState::Dead,
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Committed state, the one neighbors and the renderer observe.
    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    /// Write the state for the next generation. Last write wins.
    pub fn queue(&mut self, state: CellState) {
        self.pending = state;
    }

    /// Make the queued state authoritative.
    pub fn commit(&mut self) {
        self.state = self.pending;
    }

    /// Flip the cell immediately, bypassing the generation buffer.
    pub fn toggle(&mut self) {
        self.queue(self.state.toggled());
        self.commit();
    }
}
