//! Render bridge
//!
//! Converts engine state into a flat, FFI-friendly buffer a host renderer can
//! walk without allocations on its side, and provides the pixel geometry
//! (cell bounds, pointer picking) the renderer and input layer share.
//!
//! # Buffer Layout (Version 1.0)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ HEADER (HEADER_SIZE = 5 elements)                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ [0] width       - grid width in cells                           │
//! │ [1] height      - grid height in cells                          │
//! │ [2] cell_size   - pixel size of one cell                        │
//! │ [3] is_running  - 1.0 = running, 0.0 = stopped                  │
//! │ [4] generation  - completed generations (as f32, exact < 2^24)  │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ CELL DATA (width × height elements, column-major)               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ [HEADER_SIZE + column * height + row] = 1.0 alive / 0.0 dead    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The generation field is a display value. Past 2^24 (16,777,216) an `f32`
//! can no longer hold every integer, so it rounds. Hosts that need the exact
//! count read [`LifeEngine::generation`] or the JSON snapshot.
//!
//! Cell `(column, row)` is drawn at `x = column * cell_size`,
//! `y = row * cell_size`.
//!
//! # Determinism
//!
//! The same engine state always produces the same buffer.

use crate::cell::CellState;
use crate::engine::LifeEngine;
use crate::snapshot::CellCoord;

// ============================================================================
// CONSTANTS - STABLE FFI CONTRACT
// ============================================================================

/// Number of f32 values in the buffer header.
///
/// **Part of the stable FFI contract. Do not change without versioning.**
pub const HEADER_SIZE: usize = 5;

/// Header offset: grid width
pub const FIELD_WIDTH: usize = 0;
/// Header offset: grid height
pub const FIELD_HEIGHT: usize = 1;
/// Header offset: cell pixel size
pub const FIELD_CELL_SIZE: usize = 2;
/// Header offset: running flag
pub const FIELD_IS_RUNNING: usize = 3;
/// Header offset: generation counter, exact only below 2^24
pub const FIELD_GENERATION: usize = 4;

/// Cell value: alive
pub const CELL_ALIVE: f32 = 1.0;
/// Cell value: dead
pub const CELL_DEAD: f32 = 0.0;

#[inline]
fn state_to_value(state: CellState) -> f32 {
    if state.is_alive() {
        CELL_ALIVE
    } else {
        CELL_DEAD
    }
}

// ============================================================================
// BUFFER
// ============================================================================

/// Convert the engine's grid into a flat buffer for the renderer.
///
/// ```rust
/// use life_sim::LifeEngine;
/// use life_sim::render_bridge::{grid_to_flatbuffer, HEADER_SIZE};
///
/// let engine = LifeEngine::new().unwrap();
/// let buffer = grid_to_flatbuffer(&engine);
/// assert_eq!(buffer.len(), HEADER_SIZE + 100 * 100);
/// ```
pub fn grid_to_flatbuffer(engine: &LifeEngine) -> Vec<f32> {
    let grid = engine.grid();
    let buffer_size = calculate_buffer_size(grid.width(), grid.height());
    let mut buffer = Vec::with_capacity(buffer_size);

    buffer.push(grid.width() as f32);
    buffer.push(grid.height() as f32);
    buffer.push(engine.cell_size());
    buffer.push(if engine.is_running() { 1.0 } else { 0.0 });
    buffer.push(engine.generation() as f32);

    // Grid storage order is already column-major.
    buffer.extend(grid.iter().map(|cell| state_to_value(cell.state())));

    debug_assert_eq!(buffer.len(), buffer_size, "Buffer size mismatch");
    buffer
}

/// `HEADER_SIZE + width * height`
#[inline]
pub fn calculate_buffer_size(width: usize, height: usize) -> usize {
    HEADER_SIZE + width * height
}

/// Buffer offset of a cell value.
#[inline]
pub const fn cell_offset(column: usize, row: usize, height: usize) -> usize {
    HEADER_SIZE + column * height + row
}

/// Read `(width, height)` back out of a buffer header.
pub fn parse_dimensions(buffer: &[f32]) -> Option<(usize, usize)> {
    if buffer.len() < HEADER_SIZE {
        return None;
    }
    Some((buffer[FIELD_WIDTH] as usize, buffer[FIELD_HEIGHT] as usize))
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment: the right and bottom edges belong to the next rect.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && py >= self.y && px < self.x + self.width && py < self.y + self.height
    }
}

/// Something the renderer can place on screen.
pub trait VisualBounds {
    fn bounds(&self) -> Rect;
}

/// Something that can receive pointer presses.
pub trait PointerTarget: VisualBounds {
    fn accepts_pointer(&self) -> bool;

    fn hit(&self, px: f32, py: f32) -> bool {
        self.accepts_pointer() && self.bounds().contains(px, py)
    }
}

/// Pixel bounds of a cell.
pub fn cell_bounds(column: usize, row: usize, cell_size: f32) -> Rect {
    Rect::new(
        column as f32 * cell_size,
        row as f32 * cell_size,
        cell_size,
        cell_size,
    )
}

/// Map a pointer position to the cell under it.
pub fn pick_cell(engine: &LifeEngine, px: f32, py: f32) -> Option<CellCoord> {
    let size = engine.cell_size();
    if !(px >= 0.0 && py >= 0.0) {
        return None;
    }
    let column = (px / size).floor() as usize;
    let row = (py / size).floor() as usize;
    engine
        .grid()
        .in_bounds(column, row)
        .then_some(CellCoord::new(column, row))
}

/// Read-only render view of one cell.
///
/// Cells accept pointer input only while the engine is stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSprite {
    pub coord: CellCoord,
    pub state: CellState,
    bounds: Rect,
    interactive: bool,
}

impl VisualBounds for CellSprite {
    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl PointerTarget for CellSprite {
    fn accepts_pointer(&self) -> bool {
        self.interactive
    }
}

/// Visit every cell in grid order as a sprite.
pub fn cell_sprites(engine: &LifeEngine) -> impl Iterator<Item = CellSprite> + '_ {
    let size = engine.cell_size();
    let interactive = !engine.is_running();
    engine.grid().iter().map(move |cell| CellSprite {
        coord: CellCoord::new(cell.column(), cell.row()),
        state: cell.state(),
        bounds: cell_bounds(cell.column(), cell.row(), size),
        interactive,
    })
}

// ============================================================================
// TESTS
// ============================================================================
