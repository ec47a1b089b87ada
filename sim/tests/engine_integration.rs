use life_sim::render_bridge::{grid_to_flatbuffer, pick_cell};
use life_sim::store::{KeyValueStore, STORED_STATE_KEY};
use life_sim::{
    CellCoord, CellState, ControlCommand, FileStore, LifeConfig, LifeEngine, LiveCellSet,
    MemoryStore, SnapshotStore,
};

fn engine(width: usize, height: usize) -> LifeEngine {
    LifeEngine::with_config(LifeConfig {
        width,
        height,
        ..Default::default()
    })
    .expect("engine")
}

fn coords(set: &LiveCellSet) -> Vec<(usize, usize)> {
    set.iter().map(|c| (c.column, c.row)).collect()
}

#[test]
fn vertical_blinker_flips_to_horizontal_on_threshold() {
    let mut engine = engine(5, 5);
    for (c, r) in [(2, 2), (2, 3), (2, 4)] {
        assert_eq!(engine.toggle_cell(c, r), Ok(true));
    }

    engine.start();
    let threshold = engine.config().tick_threshold_ms();
    assert!(engine.advance(threshold));

    let grid = engine.grid();
    assert_eq!(grid.state_at(1, 3), Some(CellState::Alive));
    assert_eq!(grid.state_at(2, 3), Some(CellState::Alive));
    assert_eq!(grid.state_at(3, 3), Some(CellState::Alive));
    assert_eq!(grid.state_at(2, 2), Some(CellState::Dead));
    assert_eq!(grid.state_at(2, 4), Some(CellState::Dead));
    assert_eq!(coords(engine.live_cells()), vec![(1, 3), (2, 3), (3, 3)]);
}

#[test]
fn block_is_stable_for_ten_generations() {
    let mut engine = engine(6, 6);
    for (c, r) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
        engine.toggle_cell(c, r).unwrap();
    }
    let before = engine.live_cells().clone();
    for _ in 0..10 {
        engine.step();
    }
    assert_eq!(engine.generation(), 10);
    assert_eq!(engine.live_cells(), &before);
}

#[test]
fn blinker_has_period_two() {
    let mut engine = engine(7, 7);
    for (c, r) in [(2, 3), (3, 3), (4, 3)] {
        engine.toggle_cell(c, r).unwrap();
    }
    let start = engine.live_cells().clone();

    engine.step();
    assert!(!engine.live_cells().same_cells(&start));
    engine.step();
    assert!(engine.live_cells().same_cells(&start));
}

#[test]
fn glider_travels_diagonally() {
    let mut engine = engine(10, 10);
    for (c, r) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
        engine.toggle_cell(c, r).unwrap();
    }
    for _ in 0..4 {
        engine.step();
    }
    let expected: LiveCellSet = [(2, 1), (3, 2), (1, 3), (2, 3), (3, 3)]
        .into_iter()
        .map(CellCoord::from)
        .collect();
    assert!(engine.live_cells().same_cells(&expected));
}

#[test]
fn save_then_load_reproduces_live_cells() {
    let mut engine = engine(8, 8);
    for (c, r) in [(0, 0), (7, 7), (3, 4), (4, 4)] {
        engine.toggle_cell(c, r).unwrap();
    }
    let saved = engine.live_cells().clone();
    engine.save().unwrap();

    engine.clear_grid();
    assert!(engine.live_cells().is_empty());

    assert_eq!(engine.load(), 4);
    assert!(engine.live_cells().same_cells(&saved));
}

#[test]
fn load_onto_shrunk_grid_drops_out_of_range() {
    let mut engine = engine(10, 10);
    for (c, r) in [(1, 1), (8, 2), (2, 9)] {
        engine.toggle_cell(c, r).unwrap();
    }
    engine.save().unwrap();

    assert_eq!(engine.resize(5, 5), Ok(true));
    assert_eq!(engine.load(), 1);
    assert_eq!(coords(engine.live_cells()), vec![(1, 1)]);
}

#[test]
fn load_onto_larger_grid_leaves_rest_dead() {
    let mut engine = engine(4, 4);
    engine.toggle_cell(3, 3).unwrap();
    engine.save().unwrap();

    engine.resize(12, 12).unwrap();
    engine.load();
    assert_eq!(engine.grid().live_count(), 1);
    assert!(engine.grid().is_alive(3, 3));
}

#[test]
fn auto_load_applies_snapshot_before_first_tick() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("life-store.json");
    let config = LifeConfig {
        width: 6,
        height: 6,
        ..Default::default()
    };

    {
        let store = SnapshotStore::new(Box::new(FileStore::new(&path)));
        let mut engine = LifeEngine::with_store(config.clone(), store).unwrap();
        for (c, r) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            engine.toggle_cell(c, r).unwrap();
        }
        engine.save().unwrap();
        engine.set_auto_load(true).unwrap();
    }

    let store = SnapshotStore::new(Box::new(FileStore::new(&path)));
    let engine = LifeEngine::with_store(config, store).unwrap();
    assert_eq!(engine.generation(), 0);
    assert_eq!(engine.live_cells().len(), 4);
    assert!(engine.grid().is_alive(2, 2));
}

#[test]
fn auto_load_disabled_starts_empty() {
    let mut backend = MemoryStore::new();
    backend
        .set(STORED_STATE_KEY, r#"[{"column":0,"row":0}]"#)
        .unwrap();
    let engine = LifeEngine::with_store(
        LifeConfig {
            width: 3,
            height: 3,
            ..Default::default()
        },
        SnapshotStore::new(Box::new(backend)),
    )
    .unwrap();
    assert!(engine.live_cells().is_empty());
}

#[test]
fn edits_rejected_while_running_and_accepted_after_stop() {
    let mut engine = engine(5, 5);
    engine.apply(ControlCommand::Start).unwrap();
    engine
        .apply(ControlCommand::ToggleCell { column: 1, row: 1 })
        .unwrap();
    assert!(!engine.grid().is_alive(1, 1));

    engine.apply(ControlCommand::Stop).unwrap();
    engine
        .apply(ControlCommand::ToggleCell { column: 1, row: 1 })
        .unwrap();
    assert!(engine.grid().is_alive(1, 1));
}

#[test]
fn pointer_press_toggles_picked_cell() {
    let mut engine = engine(5, 5);
    let coord = pick_cell(&engine, 45.0, 61.0).expect("inside grid");
    assert_eq!(coord, CellCoord::new(2, 3));
    engine
        .apply(ControlCommand::ToggleCell {
            column: coord.column,
            row: coord.row,
        })
        .unwrap();

    let buffer = grid_to_flatbuffer(&engine);
    assert_eq!(buffer.iter().skip(5).filter(|v| **v == 1.0).count(), 1);
}

#[test]
fn frame_loop_with_variable_frame_times() {
    let mut engine = engine(5, 5);
    for (c, r) in [(1, 2), (2, 2), (3, 2)] {
        engine.toggle_cell(c, r).unwrap();
    }
    engine.start();

    // 16 ms frames: a generation every 7th frame (112 ms >= 100 ms).
    let mut generations = 0;
    for _ in 0..70 {
        if engine.advance(16.0) {
            generations += 1;
        }
    }
    assert_eq!(generations, 10);
    assert_eq!(engine.generation(), 10);
    assert_eq!(engine.live_cells().len(), 3);
}
