//! Brickfall headless entry point
//!
//! Runs the attract mode against a null display for a number of frames at
//! the normal frame cadence and logs how the run went.
//!
//! Usage: `brickfall [frames] [config.json]`
//! The high score file defaults to the temp dir; `BRICKFALL_SCORES`
//! overrides it.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use brickfall::display::NullDisplay;
use brickfall::input::ScriptedInput;
use brickfall::sim::{GameEvent, GameState, LEVELS};
use brickfall::system::{BatteryFlag, HeadlessSystem};
use brickfall::util::StdClock;
use brickfall::{FrameLoop, GameConfig, JsonFileStore};

fn main() {
    env_logger::init();
    log::info!("Brickfall (headless) starting...");

    let mut args = std::env::args().skip(1);
    let frames: u64 = match args.next() {
        Some(arg) => match arg.parse() {
            Ok(n) => n,
            Err(_) => {
                log::error!("Frame count must be a number, got {:?}", arg);
                std::process::exit(2);
            }
        },
        None => 600,
    };

    let config = match args.next() {
        Some(path) => {
            let (config, err) = GameConfig::load_or_default(&path);
            if let Some(e) = err {
                log::warn!("Config {} not usable ({}), using defaults", path, e);
            }
            config
        }
        None => GameConfig::default(),
    };

    let scores_path = std::env::var("BRICKFALL_SCORES")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("brickfall_highscore.json"));

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Seed {}, {} frames", seed, frames);

    let mut frame_loop = FrameLoop::new(
        GameState::new(config, &LEVELS, seed),
        StdClock::new(),
        ScriptedInput::default(),
        NullDisplay,
        JsonFileStore::new(scores_path),
        HeadlessSystem,
        BatteryFlag::new(),
    );

    let mut bricks = 0u32;
    let mut levels = 0u32;
    let mut lives_lost = 0u32;
    for _ in 0..frames {
        if let Err(e) = frame_loop.run_frame() {
            log::error!("Aborting: {}", e);
            std::process::exit(1);
        }
        for event in &frame_loop.state.events {
            match event {
                GameEvent::BrickDestroyed { .. } => bricks += 1,
                GameEvent::LevelComplete { .. } => levels += 1,
                GameEvent::LifeLost { .. } => lives_lost += 1,
                _ => {}
            }
        }
    }

    let state = &frame_loop.state;
    log::info!(
        "Done after {} frames: level {}, {} points, {} lives, {} bricks destroyed, {} levels cleared, {} lives lost",
        frame_loop.frames(),
        state.level_index + 1,
        state.points,
        state.lives,
        bricks,
        levels,
        lives_lost
    );
}
