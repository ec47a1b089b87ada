//! Cell grid - the bounded 2D array the rule is evaluated over.
//!
//! Cells are stored column-major (`index = column * height + row`) so that
//! plain slice iteration matches the grid's public iteration order: outer
//! loop over columns ascending, inner loop over rows ascending.
//!
//! Edges are bounded. Positions outside `[0, width) x [0, height)` do not
//! exist and never count as neighbors.

use crate::cell::{Cell, CellState};
use crate::error::{LifeError, Result};
use crate::snapshot::{CellCoord, LiveCellSet};
use bevy_ecs::prelude::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Relative positions of the eight Moore neighbors.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Conway's B3/S23 transition for one cell.
#[inline]
pub fn conway_rule(state: CellState, live_neighbors: u8) -> CellState {
    match (state, live_neighbors) {
        (CellState::Alive, 2) | (CellState::Alive, 3) => CellState::Alive, // Survival
        (CellState::Alive, _) => CellState::Dead,                           // Under/overpopulation
        (CellState::Dead, 3) => CellState::Alive,                           // Birth
        (CellState::Dead, _) => CellState::Dead,
    }
}

/// Grid of cells, owned by the engine's world as a resource.
#[derive(Resource, Debug, Clone)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Allocate a grid of dead cells.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let invalid = LifeError::InvalidDimension { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        let len = width.checked_mul(height).ok_or_else(|| invalid.clone())?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| invalid)?;
        for column in 0..width {
            for row in 0..height {
                cells.push(Cell::new(column, row));
            }
        }

        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, column: usize, row: usize) -> bool {
        column < self.width && row < self.height
    }

    fn cell_index(&self, column: usize, row: usize) -> Option<usize> {
        if self.in_bounds(column, row) {
            Some(column * self.height + row)
        } else {
            None
        }
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Cell> {
        self.cell_index(column, row).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut Cell> {
        self.cell_index(column, row).map(|i| &mut self.cells[i])
    }

    /// Committed state at a position, or `None` outside the grid.
    pub fn state_at(&self, column: usize, row: usize) -> Option<CellState> {
        self.get(column, row).map(Cell::state)
    }

    pub fn is_alive(&self, column: usize, row: usize) -> bool {
        self.get(column, row).is_some_and(Cell::is_alive)
    }

    /// Count live cells among the up-to-eight in-bounds neighbors.
    ///
    /// Reads committed states only, so it is safe to call while a generation
    /// has queued but not yet committed.
    pub fn neighbor_count(&self, column: usize, row: usize) -> u8 {
        let mut count = 0;
        for &(dc, dr) in &NEIGHBOR_OFFSETS {
            let (Some(c), Some(r)) = (column.checked_add_signed(dc), row.checked_add_signed(dr))
            else {
                continue;
            };
            if self.is_alive(c, r) {
                count += 1;
            }
        }
        count
    }

    /// Visit every cell in column-major order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Cell),
    {
        for cell in &self.cells {
            f(cell);
        }
    }

    /// Visit every cell mutably in column-major order.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Cell),
    {
        for cell in &mut self.cells {
            f(cell);
        }
    }

    /// Iterate cells in column-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Flip a single cell immediately.
    pub fn toggle_at(&mut self, column: usize, row: usize) -> Result<CellState> {
        let cell = self
            .get_mut(column, row)
            .ok_or(LifeError::OutOfRange { column, row })?;
        cell.toggle();
        Ok(cell.state())
    }

    /// Force a cell alive immediately (queue + commit). Returns false when the
    /// position is outside the grid.
    pub fn revive_at(&mut self, column: usize, row: usize) -> bool {
        match self.get_mut(column, row) {
            Some(cell) => {
                cell.queue(CellState::Alive);
                cell.commit();
                true
            }
            None => false,
        }
    }

    /// Kill every cell immediately.
    pub fn clear(&mut self) {
        self.for_each_mut(|cell| {
            cell.queue(CellState::Dead);
            cell.commit();
        });
    }

    /// Queue pass: evaluate the rule for every cell against committed states.
    ///
    /// No cell is committed here; all neighbor reads finish before any write
    /// becomes visible.
    pub fn queue_next_generation(&mut self) {
        #[cfg(feature = "parallel")]
        let next: Vec<CellState> = self
            .cells
            .par_iter()
            .map(|cell| conway_rule(cell.state(), self.neighbor_count(cell.column(), cell.row())))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let next: Vec<CellState> = self
            .cells
            .iter()
            .map(|cell| conway_rule(cell.state(), self.neighbor_count(cell.column(), cell.row())))
            .collect();

        for (cell, state) in self.cells.iter_mut().zip(next) {
            cell.queue(state);
        }
    }

    /// Commit pass: make every queued state authoritative.
    pub fn commit_all(&mut self) {
        self.for_each_mut(Cell::commit);
    }

    /// Coordinates of all live cells in iteration order.
    pub fn live_cells(&self) -> LiveCellSet {
        self.iter()
            .filter(|cell| cell.is_alive())
            .map(|cell| CellCoord::new(cell.column(), cell.row()))
            .collect()
    }

    pub fn live_count(&self) -> usize {
        self.iter().filter(|cell| cell.is_alive()).count()
    }
}
