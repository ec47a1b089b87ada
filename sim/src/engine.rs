//! Simulation engine - the public API hosts drive.
//!
//! `LifeEngine` owns the ECS world (grid, live-cell set, generation counter,
//! config) plus the persistence store, and exposes the STOPPED / RUNNING
//! state machine.
//!
//! ## Frame-rate decoupling
//!
//! The host calls [`LifeEngine::advance`] once per rendered frame with the
//! elapsed wall-clock milliseconds. Time accumulates while running, and once
//! it reaches the tick threshold exactly one generation runs. There is no
//! catch-up loop: a long frame still produces a single generation. What
//! happens to the overshoot is decided by [`OvershootPolicy`].
//!
//! ## Reentrancy
//!
//! Every mutating call takes `&mut self`, so a manual edit can never land
//! between the queue and commit passes of a generation.

use crate::config::{LifeConfig, OvershootPolicy, TickMode};
use crate::control::ControlCommand;
use crate::error::{LifeError, Result};
use crate::grid::CellGrid;
use crate::snapshot::{FrameSnapshot, LiveCellSet};
use crate::store::SnapshotStore;
use crate::systems::{generation_schedule, Generation};
use bevy_ecs::prelude::*;
use tracing::{debug, info, warn};

/// The main simulation container.
pub struct LifeEngine {
    world: World,
    schedule: Schedule,
    store: SnapshotStore,
    running: bool,
    /// Milliseconds accumulated toward the next generation.
    accumulator_ms: f64,
}

impl LifeEngine {
    /// Create an engine with the default config and an in-memory store.
    pub fn new() -> Result<Self> {
        Self::with_config(LifeConfig::default())
    }

    /// Create an engine with a custom config and an in-memory store.
    pub fn with_config(config: LifeConfig) -> Result<Self> {
        Self::with_store(config, SnapshotStore::default())
    }

    /// Create an engine backed by the given store.
    ///
    /// If the store's auto-load flag is set, the stored snapshot is applied
    /// before this returns, so it is in place before the first tick.
    pub fn with_store(mut config: LifeConfig, store: SnapshotStore) -> Result<Self> {
        config.validate()?;
        config.tick_rate = config.clamp_rate(config.tick_rate);
        let grid = CellGrid::new(config.width, config.height)?;

        let mut world = World::new();
        world.insert_resource(grid);
        world.insert_resource(LiveCellSet::default());
        world.insert_resource(Generation::default());
        world.insert_resource(config);

        let mut engine = Self {
            world,
            schedule: generation_schedule(),
            store,
            running: false,
            accumulator_ms: 0.0,
        };

        if engine.store.auto_load() {
            let applied = engine.load();
            info!(applied, "auto-loaded stored snapshot");
        }

        Ok(engine)
    }

    // ------------------------------------------------------------------
    // State machine
    // ------------------------------------------------------------------

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// STOPPED -> RUNNING. No-op when already running.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            info!(generation = self.generation(), "simulation started");
        }
    }

    /// RUNNING -> STOPPED. No-op when already stopped.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            info!(generation = self.generation(), "simulation stopped");
        }
    }

    /// Flip between running and stopped.
    pub fn toggle_running(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    // ------------------------------------------------------------------
    // Ticking
    // ------------------------------------------------------------------

    /// Feed elapsed frame time. Returns true when a generation ran.
    pub fn advance(&mut self, elapsed_ms: f64) -> bool {
        if !self.running {
            return false;
        }
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.accumulator_ms += elapsed_ms;
        }

        let (threshold, overshoot) = {
            let config = self.config();
            (config.tick_threshold_ms(), config.overshoot)
        };
        if self.accumulator_ms < threshold {
            return false;
        }

        self.accumulator_ms = match overshoot {
            OvershootPolicy::Discard => 0.0,
            OvershootPolicy::CarryForward => self.accumulator_ms % threshold,
        };
        self.run_generation();
        true
    }

    /// Host-requested single step: run exactly one generation now.
    ///
    /// This is the only way a generation runs outside RUNNING. It bypasses
    /// the accumulator and leaves both the run state and `accumulated_ms`
    /// as they were.
    pub fn step(&mut self) {
        self.run_generation();
    }

    fn run_generation(&mut self) {
        self.schedule.run(&mut self.world);
        debug!(
            generation = self.generation(),
            live = self.live_cells().len(),
            "generation complete"
        );
    }

    /// Milliseconds currently accumulated toward the next generation.
    pub fn accumulated_ms(&self) -> f64 {
        self.accumulator_ms
    }

    /// Set the tick rate, clamped to the current mode's bounds. Returns the applied rate.
    pub fn set_tick_rate(&mut self, rate: f32) -> f32 {
        let mut config = self.world.resource_mut::<LifeConfig>();
        let applied = config.clamp_rate(rate);
        config.tick_rate = applied;
        debug!(requested = rate, applied, "tick rate changed");
        applied
    }

    pub fn tick_rate(&self) -> f32 {
        self.config().tick_rate
    }

    /// Change how the tick rate is read. The rate is converted to the new
    /// unit so the generation cadence carries over. Returns the applied rate.
    pub fn set_tick_mode(&mut self, mode: TickMode) -> f32 {
        let applied = self
            .world
            .resource_mut::<LifeConfig>()
            .switch_tick_mode(mode);
        debug!(?mode, applied, "tick mode changed");
        applied
    }

    pub fn tick_mode(&self) -> TickMode {
        self.config().tick_mode
    }

    // ------------------------------------------------------------------
    // Grid edits
    // ------------------------------------------------------------------

    /// Replace the grid with a fresh, all-dead one.
    ///
    /// Returns `Ok(false)` without touching anything while running. On an
    /// invalid size the current grid is kept.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<bool> {
        if self.running {
            debug!(width, height, "resize ignored while running");
            return Ok(false);
        }
        let grid = CellGrid::new(width, height)?;

        self.world.insert_resource(grid);
        self.world.resource_mut::<LiveCellSet>().clear();
        self.world.insert_resource(Generation::default());
        {
            let mut config = self.world.resource_mut::<LifeConfig>();
            config.width = width;
            config.height = height;
        }
        self.accumulator_ms = 0.0;

        info!(width, height, "grid resized");
        Ok(true)
    }

    /// Manually flip one cell.
    ///
    /// Returns `Ok(false)` while running (edits are only accepted when
    /// stopped) and `OutOfRange` for coordinates outside the grid.
    pub fn toggle_cell(&mut self, column: usize, row: usize) -> Result<bool> {
        if self.running {
            return Ok(false);
        }
        self.world
            .resource_mut::<CellGrid>()
            .toggle_at(column, row)?;
        self.refresh_live_cells();
        Ok(true)
    }

    /// Kill every cell. No-op while running.
    pub fn clear_grid(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.world.resource_mut::<CellGrid>().clear();
        self.refresh_live_cells();
        true
    }

    fn refresh_live_cells(&mut self) {
        let cells = self.grid().live_cells();
        *self.world.resource_mut::<LiveCellSet>() = cells;
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Persist the current live-cell set, replacing any earlier snapshot.
    pub fn save(&mut self) -> Result<()> {
        let cells = self.live_cells().clone();
        self.store.save(&cells)?;
        info!(cells = cells.len(), "snapshot saved");
        Ok(())
    }

    /// Apply the stored snapshot to the current grid.
    ///
    /// Each in-bounds coordinate is set alive immediately; out-of-range ones
    /// are skipped. With no usable snapshot the live-cell set is emptied and
    /// the grid is left alone. Returns the number of cells applied.
    pub fn load(&mut self) -> usize {
        let Some(stored) = self.store.load() else {
            self.world.resource_mut::<LiveCellSet>().clear();
            debug!("no stored snapshot to load");
            return 0;
        };

        let mut applied = 0;
        {
            let mut grid = self.world.resource_mut::<CellGrid>();
            for coord in &stored {
                if grid.revive_at(coord.column, coord.row) {
                    applied += 1;
                }
            }
        }
        let skipped = stored.len() - applied;
        if skipped > 0 {
            warn!(skipped, "stored cells fall outside the grid and were ignored");
        }
        self.refresh_live_cells();
        info!(applied, "snapshot loaded");
        applied
    }

    /// Erase the stored snapshot and empty the in-memory live-cell set.
    /// Cell states are not touched.
    pub fn clear_saved(&mut self) -> Result<()> {
        self.store.clear()?;
        self.world.resource_mut::<LiveCellSet>().clear();
        info!("stored snapshot cleared");
        Ok(())
    }

    pub fn auto_load(&self) -> bool {
        self.store.auto_load()
    }

    pub fn set_auto_load(&mut self, enabled: bool) -> Result<()> {
        self.store.set_auto_load(enabled)
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Apply one input-boundary command.
    pub fn apply(&mut self, command: ControlCommand) -> Result<()> {
        match command {
            ControlCommand::ToggleCell { column, row } => {
                self.toggle_cell(column, row)?;
            }
            ControlCommand::Start => self.start(),
            ControlCommand::Stop => self.stop(),
            ControlCommand::ToggleRunning => self.toggle_running(),
            ControlCommand::Step => self.step(),
            ControlCommand::SetTickRate(rate) => {
                self.set_tick_rate(rate);
            }
            ControlCommand::SetTickMode(mode) => {
                self.set_tick_mode(mode);
            }
            ControlCommand::Resize { width, height } => {
                self.resize(width, height)?;
            }
            ControlCommand::ClearGrid => {
                self.clear_grid();
            }
            ControlCommand::Save => self.save()?,
            ControlCommand::Load => {
                self.load();
            }
            ControlCommand::ClearSaved => self.clear_saved()?,
            ControlCommand::SetAutoLoad(enabled) => self.set_auto_load(enabled)?,
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn grid(&self) -> &CellGrid {
        self.world.resource::<CellGrid>()
    }

    pub fn live_cells(&self) -> &LiveCellSet {
        self.world.resource::<LiveCellSet>()
    }

    pub fn config(&self) -> &LifeConfig {
        self.world.resource::<LifeConfig>()
    }

    pub fn generation(&self) -> u64 {
        self.world.resource::<Generation>().0
    }

    pub fn width(&self) -> usize {
        self.grid().width()
    }

    pub fn height(&self) -> usize {
        self.grid().height()
    }

    pub fn cell_size(&self) -> f32 {
        self.config().cell_size
    }

    /// Bail out with `OutOfRange` for coordinates outside the grid.
    pub fn check_bounds(&self, column: usize, row: usize) -> Result<()> {
        if self.grid().in_bounds(column, row) {
            Ok(())
        } else {
            Err(LifeError::OutOfRange { column, row })
        }
    }

    /// Get a snapshot of the current engine state.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            generation: self.generation(),
            running: self.running,
            width: self.width(),
            height: self.height(),
            cell_size: self.cell_size(),
            tick_rate: self.tick_rate(),
            live_cells: self.live_cells().clone(),
        }
    }

    /// Get the snapshot as a JSON string.
    pub fn snapshot_json(&self) -> String {
        self.snapshot()
            .to_json()
            .unwrap_or_else(|_| "{}".to_string())
    }
}
