//! Arcanoid entry point
//!
//! Loads settings and the level, then either writes a generated layout or
//! runs the game loop headless with the autopilot at the controls.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use arcanoid::engine::{Autopilot, LogPresenter, Pacing};
use arcanoid::layout::{generate_layout, load_layout, save_layout};
use arcanoid::sim::LevelSource;
use arcanoid::{Engine, Settings};

#[derive(Parser, Debug)]
#[command(name = "arcanoid", version, about = "Arcanoid launcher")]
struct Args {
    /// Path to the game config JSON
    #[arg(long, default_value = "game_config.json")]
    config: PathBuf,

    /// Difficulty level to use (defined in the config file)
    #[arg(long, default_value = "medium")]
    difficulty: String,

    /// Pre-built level layout JSON (brick positions and strengths)
    #[arg(long)]
    level_file: Option<PathBuf>,

    /// Generate a random level layout to OUTPUT and exit
    #[arg(long, value_name = "OUTPUT")]
    generate_level: Option<PathBuf>,

    /// Fill ratio for generated levels (0-1)
    #[arg(long, default_value_t = 0.85)]
    density: f64,

    /// Seed for level generation and gameplay randomness
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Simulate as fast as possible instead of in real time
    #[arg(long)]
    unpaced: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let settings = match Settings::load(&args.config, &args.difficulty) {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });

    if let Some(output) = &args.generate_level {
        let layout = generate_layout(&settings, args.density, seed);
        return match save_layout(output, &layout) {
            Ok(()) => {
                println!("Level generated to: {}", output.display());
                ExitCode::SUCCESS
            }
            Err(err) => {
                log::error!("{}", err);
                ExitCode::FAILURE
            }
        };
    }

    let source = match &args.level_file {
        Some(path) => match load_layout(path) {
            Ok(layout) => LevelSource::Layout(layout),
            Err(err) => {
                log::error!("Failed to load level: {}", err);
                return ExitCode::FAILURE;
            }
        },
        None => LevelSource::Procedural,
    };

    log::info!("Display and audio are external; running headless with the autopilot");
    let pacing = if args.unpaced {
        Pacing::Fixed
    } else {
        Pacing::RealTime
    };
    let mut engine = Engine::new(settings, source, seed);
    let summary = engine.run(
        &mut Autopilot::default(),
        &mut LogPresenter::default(),
        pacing,
        Some(args.frames),
    );

    log::info!(
        "Finished after {} frames: score {}, lives {}, {}",
        summary.frames,
        summary.score,
        summary.lives,
        if summary.victory { "cleared" } else { "not cleared" }
    );
    ExitCode::SUCCESS
}
