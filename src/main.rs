//! Tile Runner entry point
//!
//! Headless runner: drives the simulation with the autopilot and prints a
//! JSON summary of the run. Used for smoke runs and balancing.
//!
//! Usage: `tile-runner [settings.json] [max-frames]`

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use tile_runner::Settings;
use tile_runner::assets;
use tile_runner::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Default frame cap: ten minutes at 60 fps
const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 10;

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    score: u64,
    scroll_speed: u32,
    lives: u8,
    continues: u32,
    phase: GamePhase,
    milestones: Vec<&'static str>,
    /// Draw commands issued per asset key
    draws: BTreeMap<&'static str, u64>,
}

fn main() {
    env_logger::init();
    log::info!("Tile Runner (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let max_frames = args
        .next()
        .and_then(|s| match s.parse() {
            Ok(n) => Some(n),
            Err(e) => {
                log::warn!("Ignoring frame cap {:?}: {}", s, e);
                None
            }
        })
        .unwrap_or(DEFAULT_MAX_FRAMES);

    let clock_seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let seed = settings.seed_or(clock_seed);
    log::info!("Game initialized with seed: {}", seed);

    let summary = run(&settings, seed, max_frames);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize run summary: {}", e),
    }
}

fn run(settings: &Settings, seed: u64, max_frames: u64) -> RunSummary {
    let mut state = GameState::new(settings.tuning.clone(), seed);
    state.set_enemies_enabled(settings.enemies_enabled);
    state.start_session(false);

    let input = TickInput {
        jump: false,
        idle_mode: true,
    };
    let mut frames = 0;
    let mut continues = 0;
    let mut milestones = Vec::new();
    let mut draws: BTreeMap<&'static str, u64> = BTreeMap::new();

    while frames < max_frames {
        let out = tick(&mut state, &input);
        frames += 1;

        for cmd in &out.draws {
            let key = assets::entry_for(cmd.sprite).map_or("unknown", |e| e.key);
            *draws.entry(key).or_default() += 1;
        }
        for event in &out.events {
            if let GameEvent::MilestoneReached(m) = event {
                milestones.push(m.id());
            }
        }

        match state.phase {
            GamePhase::AwaitingContinue => {
                continues += 1;
                state.continue_game();
            }
            GamePhase::GameOver => break,
            GamePhase::Ready | GamePhase::Playing => {}
        }
    }

    log::info!(
        "Run finished after {} frames: score {}, speed {}",
        frames,
        state.progression.score,
        state.progression.scroll_speed
    );

    RunSummary {
        seed,
        frames,
        score: state.progression.score,
        scroll_speed: state.progression.scroll_speed,
        lives: state.lives,
        continues,
        phase: state.phase,
        milestones,
        draws,
    }
}
