//! ECS systems for the Game of Life simulation.
//!
//! One generation is a single run of the schedule built by
//! [`generation_schedule`]. The systems are chained, never parallel:
//!
//! 1. `queue_generation_system` - evaluate B3/S23 for every cell against
//!    committed states and queue the result
//! 2. `commit_generation_system` - commit every queued state
//! 3. `census_system` - rebuild `LiveCellSet`, bump `Generation`
//!
//! The chain is what guarantees that every neighbor read of a generation
//! happens before any of its commits.

pub mod census;
pub mod generation;

pub use census::*;
pub use generation::*;

use bevy_ecs::prelude::*;

/// Build the schedule that runs exactly one generation per `run`.
pub fn generation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            queue_generation_system,
            commit_generation_system,
            census_system,
        )
            .chain(),
    );
    schedule
}
