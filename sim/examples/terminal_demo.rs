//! Headless demonstration of the Game of Life core.
//!
//! Run with: RUST_LOG=debug cargo run --example terminal_demo

use life_sim::render_bridge::{grid_to_flatbuffer, parse_dimensions, cell_offset, CELL_ALIVE};
use life_sim::{ControlCommand, ControlPanel, LifeConfig, LifeEngine};
use tracing::info;

fn main() -> life_sim::Result<()> {
    init_tracing();
    println!("=== Game of Life - Simulation Demo ===\n");

    let mut engine = LifeEngine::with_config(LifeConfig {
        width: 12,
        height: 12,
        ..Default::default()
    })?;
    let mut panel = ControlPanel::new();

    // Glider in the top-left corner.
    for (column, row) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
        engine.apply(ControlCommand::ToggleCell { column, row })?;
    }

    println!("Initial state:");
    print_grid(&engine);

    // Press START the way a host would forward a click.
    if let Some(command) = panel.press(20.0, 20.0) {
        engine.apply(command)?;
        panel.sync(engine.is_running());
    }

    // Simulate ~2 seconds of 60 Hz frames.
    for frame in 0..120 {
        if engine.advance(1000.0 / 60.0) && engine.generation() % 4 == 0 {
            println!("--- Generation {} (frame {}) ---", engine.generation(), frame);
            print_grid(&engine);
        }
    }

    engine.apply(ControlCommand::Stop)?;
    engine.apply(ControlCommand::Save)?;
    info!(generation = engine.generation(), "demo finished");

    println!("\n=== Final State (JSON) ===\n");
    println!("{}", engine.snapshot().to_json_pretty().unwrap_or_default());
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn print_grid(engine: &LifeEngine) {
    let buffer = grid_to_flatbuffer(engine);
    let Some((width, height)) = parse_dimensions(&buffer) else {
        return;
    };
    for row in 0..height {
        let line: String = (0..width)
            .map(|column| {
                if buffer[cell_offset(column, row, height)] == CELL_ALIVE {
                    '#'
                } else {
                    '.'
                }
            })
            .collect();
        println!("  {line}");
    }
}
