//! Astro Runner headless entry point
//!
//! Acts as the session controller: loads configuration and the hazard
//! catalog, starts the engine, drives fixed steps and reports the final score.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use astro_runner::consts::SIM_STEP_MS;
use astro_runner::sim::{Catalog, GameEvent, GameState, PlayField, TickInput, tick};
use astro_runner::{Settings, Tuning};

#[derive(Parser)]
#[command(name = "astro-runner")]
#[command(about = "Run a headless Astro Runner session", long_about = None)]
#[command(version)]
struct Cli {
    /// Run seed (defaults to the settings seed, then to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of simulation steps
    #[arg(long, default_value_t = 60 * 60 * 5)]
    ticks: u64,

    /// Near-earth-object feed document used as the hazard catalog
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Tuning overrides (JSON)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Settings file (JSON)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Let the demo pilot dodge hazards and chase pickups
    #[arg(long)]
    autopilot: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = cli
        .settings
        .as_deref()
        .map(Settings::load_or_default)
        .unwrap_or_default();
    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning {}", path.display()))?,
        None => Tuning::default(),
    };
    let catalog = cli.catalog.as_deref().map(load_catalog).unwrap_or_default();

    let seed = cli.seed.or(settings.seed).unwrap_or_else(clock_seed);
    log::info!("Astro Runner starting (seed {})", seed);

    let mut state =
        GameState::with_config(seed, PlayField::default(), tuning, &settings).with_catalog(catalog);
    state.start();

    let mut final_score = None;
    let mut hits = 0u32;
    let mut pickups = 0u32;

    for _ in 0..cli.ticks {
        let input = if cli.autopilot {
            autopilot(&state)
        } else {
            TickInput::default()
        };
        for event in tick(&mut state, &input, SIM_STEP_MS) {
            match event {
                GameEvent::HazardHit { shielded: false } => hits += 1,
                GameEvent::PickupCollected(kind) => {
                    pickups += 1;
                    log::debug!("Collected {}", kind.as_str());
                }
                GameEvent::GameOver { score, altitude } => {
                    final_score = Some((score, altitude));
                }
                _ => {}
            }
        }
        if !state.is_active() {
            break;
        }
    }

    if cli.snapshot {
        println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    }

    match final_score {
        Some((score, altitude)) => {
            println!(
                "Game over after {} hits: score {:.0}, altitude {:.0}, {} pickups",
                hits,
                score.floor(),
                altitude.floor(),
                pickups
            );
        }
        None => {
            println!(
                "Survived {} steps: score {:.0}, altitude {:.0}, lives {}, {} pickups",
                state.time_ticks,
                state.player.score.floor(),
                state.altitude().floor(),
                state.player.lives,
                pickups
            );
        }
    }

    Ok(())
}

/// Read a feed file; any failure degrades to synthetic hazards
fn load_catalog(path: &std::path::Path) -> Catalog {
    let loaded = std::fs::read_to_string(path)
        .map_err(astro_runner::EngineError::from)
        .and_then(|json| Catalog::from_feed_json(&json));
    match loaded {
        Ok(catalog) => catalog,
        Err(e) => {
            log::warn!(
                "Failed to load catalog {}, using synthetic hazards: {}",
                path.display(),
                e
            );
            Catalog::default()
        }
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Demo pilot: sidestep the most threatening hazard, otherwise drift toward
/// the nearest pickup, otherwise return to the home position.
fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;

    // Hazards above the player and within a few widths horizontally
    let threat = state
        .hazards
        .iter()
        .filter(|h| h.pos.y < player.pos.y + player.half_size)
        .filter(|h| (h.pos.x - player.pos.x).abs() < h.half_extent() + player.half_size * 2.0)
        .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(std::cmp::Ordering::Equal));

    if let Some(hazard) = threat {
        let away = if hazard.pos.x > player.pos.x { -1.0 } else { 1.0 };
        // Walls force a dodge the other way
        let away = if (away < 0.0 && player.pos.x <= player.half_size * 2.0)
            || (away > 0.0 && player.pos.x >= state.field.width - player.half_size * 2.0)
        {
            -away
        } else {
            away
        };
        return TickInput::moving(away, 0.0);
    }

    let wanted = state
        .pickups
        .iter()
        .filter(|p| p.pos.y < player.pos.y)
        .min_by(|a, b| {
            let da = a.pos.distance_squared(player.pos);
            let db = b.pos.distance_squared(player.pos);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

    let target = match wanted {
        Some(p) => Vec2::new(p.pos.x, player.pos.y),
        None => Vec2::new(state.field.width / 2.0, player.pos.y),
    };
    let dx = target.x - player.pos.x;
    if dx.abs() < player.speed {
        TickInput::default()
    } else {
        TickInput::moving(dx.signum(), 0.0)
    }
}
