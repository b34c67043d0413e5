//! # Delve Command Line
//!
//! Generates a dungeon and prints it as text.

use clap::Parser;
use delve::{DelveResult, GenerationConfig, Generator, RoomCorridorGenerator};
use log::{info, LevelFilter};
use std::path::PathBuf;

/// Command line arguments for the Delve generator.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "Generate a random room-and-corridor dungeon map")]
#[command(version)]
struct Args {
    /// Load generation settings from a JSON file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Map width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Map height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Number of rooms to aim for
    #[arg(long)]
    max_rooms: Option<u32>,

    /// Smallest room side
    #[arg(long)]
    room_min: Option<u32>,

    /// Largest room side
    #[arg(long)]
    room_max: Option<u32>,

    /// Cap on room placement attempts
    #[arg(long)]
    max_tries: Option<u32>,

    /// Random seed for reproducible maps
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print placement statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    /// Builds the generation config from the file (or the classic preset)
    /// with command line overrides applied.
    fn to_config(&self) -> DelveResult<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::from_json_file(path)?,
            None => GenerationConfig::classic(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(max_rooms) = self.max_rooms {
            config.max_rooms = max_rooms;
        }
        if let Some(room_min) = self.room_min {
            config.room_min = room_min;
        }
        if let Some(room_max) = self.room_max {
            config.room_max = room_max;
        }
        if let Some(max_tries) = self.max_tries {
            config.max_tries = max_tries;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        Ok(config)
    }
}

fn main() -> DelveResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Delve v{}", delve::VERSION);

    let config = args.to_config()?;
    info!("Generating {}x{} dungeon", config.width, config.height);

    let generator = RoomCorridorGenerator::new();
    let mut rng = delve::utils::create_rng(&config);
    let dungeon = generator.generate(&config, &mut rng)?;

    println!("{}", dungeon.render());

    if args.stats {
        let stats = dungeon.stats;
        eprintln!(
            "rooms: {}/{}  attempts: {}  rejected: {}  corridors: {}",
            stats.accepted, config.max_rooms, stats.attempts, stats.rejected, stats.corridors
        );
    }

    Ok(())
}

/// Initializes the logging system based on the specified log level.
///
/// `RUST_LOG` is honoured first; the flag supplies the default.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();
}
