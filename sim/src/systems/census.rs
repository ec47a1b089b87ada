//! Census system - rebuilds the live-cell set after a commit.

use crate::grid::CellGrid;
use crate::snapshot::LiveCellSet;
use crate::systems::generation::Generation;
use bevy_ecs::prelude::*;

/// Rescan the grid into `LiveCellSet` and count the finished generation.
///
/// The set is rebuilt from scratch every time, never diffed.
pub fn census_system(
    grid: Res<CellGrid>,
    mut live: ResMut<LiveCellSet>,
    mut generation: ResMut<Generation>,
) {
    *live = grid.live_cells();
    generation.increment();
}
