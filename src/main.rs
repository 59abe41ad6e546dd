//! # Delve Main Entry Point
//!
//! Parses the command line, sets up logging and the window, and hands control
//! to the scene manager.

use clap::Parser;
use delve::scenes::SceneManager;
use delve::{config, DelveResult, GameConfig, InputHandler, MacroquadDisplay, SaveStore};
use log::{error, info};
use macroquad::prelude::*;
use std::path::PathBuf;

/// Command line arguments for Delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A turn-based dungeon crawler with depth-scaled monsters and loot")]
#[command(version)]
struct Args {
    /// Random seed for every new game in this run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where the session is saved on quit
    #[arg(long, default_value = config::DEFAULT_SAVE_PATH)]
    save_path: PathBuf,

    /// JSON file overriding the default game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    let (width, height) = MacroquadDisplay::window_size(config::CELL_SIZE);
    Conf {
        window_title: "Delve".to_string(),
        window_width: width,
        window_height: height,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Delve v{}", delve::VERSION);
    if let Err(err) = run(args).await {
        error!("Delve stopped: {}", err);
        std::process::exit(1);
    }
}

/// Installs the log backend.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
        tracing::debug!(filter = log_level, "tracing subscriber installed");
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new().parse_filters(log_level).init();
    }
}

async fn run(args: Args) -> DelveResult<()> {
    let game_config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GameConfig::load(path)?
        }
        None => GameConfig::default(),
    };
    game_config.generation.validate()?;

    if let Some(seed) = args.seed {
        info!("Using seed {}", seed);
    }

    let display = MacroquadDisplay::new(config::CELL_SIZE);
    let input = InputHandler::new();
    let mut scenes = SceneManager::new(game_config, SaveStore::new(args.save_path), args.seed);
    scenes.run(&display, &input).await
}
