//! Life Sim - Game of Life simulation core
//!
//! A bounded-grid Conway's Game of Life engine meant to be embedded in a host
//! UI. The host drives it from its frame callback and draws what it exposes.
//! Uses `bevy_ecs` to schedule the generation passes.

pub mod cell;
pub mod config;
pub mod control;
pub mod engine;
pub mod error;
pub mod grid;
pub mod render_bridge;
pub mod snapshot;
pub mod store;
pub mod systems;

pub use cell::{Cell, CellState};
pub use config::{LifeConfig, OvershootPolicy, TickMode};
pub use control::{Button, ControlCommand, ControlPanel};
pub use engine::LifeEngine;
pub use error::{LifeError, Result};
pub use grid::CellGrid;
pub use snapshot::{CellCoord, FrameSnapshot, LiveCellSet};
pub use store::{FileStore, KeyValueStore, MemoryStore, SnapshotStore};
