//! Generation systems - the two strict passes of one rule application.

use crate::grid::CellGrid;
use bevy_ecs::prelude::*;

/// Completed generations since the grid was built.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation(pub u64);

impl Generation {
    pub fn increment(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// Pass 1: queue every cell's next state from committed neighbor states.
pub fn queue_generation_system(mut grid: ResMut<CellGrid>) {
    grid.queue_next_generation();
}

/// Pass 2: commit every queued state.
pub fn commit_generation_system(mut grid: ResMut<CellGrid>) {
    grid.commit_all();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellState;

    #[test]
    fn test_chained_passes_advance_blinker() {
        let mut grid = CellGrid::new(5, 5).unwrap();
        for row in 1..4 {
            grid.toggle_at(2, row).unwrap();
        }

        let mut world = World::new();
        world.insert_resource(grid);

        let mut schedule = Schedule::default();
        schedule.add_systems((queue_generation_system, commit_generation_system).chain());
        schedule.run(&mut world);

        let grid = world.resource::<CellGrid>();
        assert_eq!(grid.state_at(1, 2), Some(CellState::Alive));
        assert_eq!(grid.state_at(2, 2), Some(CellState::Alive));
        assert_eq!(grid.state_at(3, 2), Some(CellState::Alive));
        assert_eq!(grid.state_at(2, 1), Some(CellState::Dead));
        assert_eq!(grid.live_count(), 3);
    }

    #[test]
    fn test_queue_alone_leaves_grid_visible_state() {
        let mut grid = CellGrid::new(3, 3).unwrap();
        grid.toggle_at(1, 1).unwrap();

        let mut world = World::new();
        world.insert_resource(grid);

        let mut schedule = Schedule::default();
        schedule.add_systems(queue_generation_system);
        schedule.run(&mut world);

        assert!(world.resource::<CellGrid>().is_alive(1, 1));
    }
}
