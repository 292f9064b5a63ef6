mod config;
mod constants;
mod entities;
mod game;
mod geometry;
mod rendering;
mod simulation;
mod spawner;
mod terminal_io;
mod types;

use std::collections::HashMap;
use std::io;

use clap::Parser;
use log::{error, info};

use crate::config::GameConfig;
use crate::game::Game;
use crate::simulation::Simulation;
use crate::terminal_io::{Control, ControlState, SimulatedInput};

const DEMO_SCRIPT_FRAMES: u64 = 300;

fn main() -> io::Result<()> {
    let config = GameConfig::parse();
    simple_logging::log_to_file(&config.log_file, config.log_level.into())?;
    info!("Starting wire-asteroids with {:?}", config);

    let mut simulation = match config.seed {
        Some(seed) => Simulation::with_seed(config.width, config.height, seed),
        None => Simulation::new(config.width, config.height),
    };
    let simulated_input = config.debug.then(demo_script);

    let mut game = Game::new(config, simulated_input)?;
    game.run(&mut simulation).map_err(|e| {
        error!("Game loop failed: {}", e);
        e
    })?;

    info!(
        "Exiting. Score: {}, lives: {}, game over: {}",
        simulation.score(),
        simulation.lives(),
        simulation.is_game_over()
    );
    Ok(())
}

/// Input played back in headless mode: a burst of thrust, a few turns and a
/// steady rhythm of shots.
fn demo_script() -> SimulatedInput {
    let mut frames = HashMap::new();
    for frame in 0..DEMO_SCRIPT_FRAMES {
        let mut controls = ControlState::new();
        if frame < 40 {
            controls = controls.hold(Control::Thrust);
        }
        if (20..60).contains(&frame) {
            controls = controls.hold(Control::RotateRight);
        }
        if (100..140).contains(&frame) {
            controls = controls.hold(Control::RotateLeft);
        }
        if frame % 15 == 10 {
            controls = controls.press(Control::Fire);
        }
        frames.insert(frame, controls);
    }
    SimulatedInput::new(frames)
}
