//! Arena Duel headless runner
//!
//! Plays one encounter with the autopilot and reports the outcome.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use arena_duel::consts::NOMINAL_FRAME_MS;
use arena_duel::sim::{GameState, Snapshot, TickInput};
use arena_duel::{Difficulty, Tuning, logging};

/// Run an autopilot encounter without a renderer
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Difficulty tier (easy, normal, hard, nightmare)
    #[arg(short, long, default_value = "normal")]
    difficulty: Difficulty,

    /// RNG seed
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Maximum number of frames to simulate
    #[arg(short, long, default_value_t = 36_000)]
    frames: u32,

    /// Wall-clock duration of one frame in milliseconds
    #[arg(long, default_value_t = NOMINAL_FRAME_MS)]
    frame_ms: f64,

    /// JSON file with tuning overrides applied on top of the difficulty preset
    #[arg(short, long)]
    tuning: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let tuning = match &args.tuning {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading tuning file {}", path.display()))?;
            Tuning::from_json(args.difficulty, &json)
                .with_context(|| format!("loading tuning from {}", path.display()))?
        }
        None => args.difficulty.tuning(),
    };

    log::info!(
        "Arena Duel starting: difficulty={}, seed={}, frames={}",
        args.difficulty,
        args.seed,
        args.frames
    );

    let mut state = GameState::with_tuning(args.difficulty, tuning, args.seed);
    let snapshot = run(&mut state, args.frames, args.frame_ms);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        report(&snapshot);
    }
    Ok(())
}

/// Step until the agent is defeated or the frame budget runs out
fn run(state: &mut GameState, frames: u32, frame_ms: f64) -> Snapshot {
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut snapshot = state.snapshot();
    for _ in 0..frames {
        snapshot = state.step(&input, frame_ms);
        if snapshot.game_over {
            break;
        }
    }
    snapshot
}

fn report(snapshot: &Snapshot) {
    match &snapshot.final_stats {
        Some(stats) => {
            println!("Defeated on wave {}", stats.wave);
            println!("  score:    {}", stats.score);
            println!(
                "  hits:     {} / {} ({:.0}%)",
                stats.hits,
                stats.shots_fired,
                stats.accuracy * 100.0
            );
            println!("  survived: {:.1} s", stats.elapsed_ms / 1000.0);
        }
        None => {
            println!("Survived {:.1} s", snapshot.time_ms / 1000.0);
            println!("  wave:   {}", snapshot.wave);
            println!("  score:  {}", snapshot.score);
            println!(
                "  health: {} / {}",
                snapshot.agent_health, snapshot.agent_max_health
            );
        }
    }
}
