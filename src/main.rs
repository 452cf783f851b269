//! Sky Hopper headless demo
//!
//! Drives the simulation with a scripted input pattern and logs what
//! happens. Useful for balance checks and for watching a seed play out
//! without a renderer attached.
//!
//! Usage: `sky-hopper [seed] [config.json]`

use std::error::Error;
use std::fs;

use sky_hopper::sim::GameEvent;
use sky_hopper::{Config, Simulation, TickInput};

const MAX_TICKS: u64 = 20_000;

fn load_config(path: &str) -> Result<Config, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let config = serde_json::from_str(&text)?;
    Ok(config)
}

/// Scripted intent: hold each direction for half a second of frames.
fn scripted_input(tick: u64) -> TickInput {
    if (tick / 30) % 2 == 0 {
        TickInput::right()
    } else {
        TickInput::left()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(raw) => raw.parse()?,
        None => 42,
    };
    let config = match args.next() {
        Some(path) => load_config(&path)?,
        None => Config::default(),
    };

    log::info!("starting run with seed {seed}");
    let mut sim = Simulation::new(config, seed);

    for t in 0..MAX_TICKS {
        let events = sim.tick(scripted_input(t));
        for event in events.iter() {
            match event {
                GameEvent::ItemCollected(kind) => log::info!("collected {kind:?}"),
                GameEvent::EnemyDestroyed => log::info!("enemy destroyed"),
                GameEvent::GameOver(cause) => log::info!("game over: {cause:?}"),
            }
        }
        if sim.is_game_over() {
            break;
        }
    }

    let snap = sim.snapshot();
    println!(
        "seed {seed}: {} ticks, score {:.0}",
        snap.time_ticks, snap.score
    );
    Ok(())
}
