// src/main.rs

use flapboard::config::{self, Config};
use flapboard::layout::weather::DescriptionCache;
use flapboard::render::{self, RenderContext};
use flapboard::transport::{RetryPolicy, Transport, VestaboardClient};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "flapboard", about = "Lay out content for a split-flap message board")]
struct Cli {
    /// TOML configuration file (defaults to $FLAPBOARD_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Seed for every random choice, for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Date weather rows are compared against (defaults to the local date)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print a preview of the composed board
    Render {
        /// Job kind: haiku, weather, ticker, tasks, quotes
        kind: String,
        /// JSON input file
        file: PathBuf,
    },
    /// Render and write to the board
    Send {
        /// Job kind: haiku, weather, ticker, tasks, quotes
        kind: String,
        /// JSON input file
        file: PathBuf,
    },
    /// Print what the board currently shows
    Read,
}

fn main() -> Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let mut rng = match cli.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match cli.command {
        Cmd::Render { kind, file } => {
            let record = load_record(&kind, &file)?;
            let mut cache = DescriptionCache::new();
            let mut ctx = RenderContext {
                today,
                categories: &config.tasks.categories,
                cache: Some(&mut cache),
            };
            let grid = render::render(&record, &mut ctx, &mut rng)
                .with_context(|| format!("Failed to lay out {} job", kind))?;
            print!("{}", render::preview(&grid));
        }
        Cmd::Send { kind, file } => {
            let record = load_record(&kind, &file)?;
            let mut client = connect(&config)?;
            let mut cache = DescriptionCache::new();
            let mut ctx = RenderContext {
                today,
                categories: &config.tasks.categories,
                cache: Some(&mut cache),
            };
            let grid = render::send(&record, &mut ctx, &mut rng, &mut client)?;
            print!("{}", render::preview(&grid));
        }
        Cmd::Read => {
            let mut client = connect(&config)?;
            let grid = client.read().context("Failed to read the board")?;
            if !grid.is_dense() {
                warn!("Board reported codes outside the known alphabet.");
            }
            print!("{}", render::preview(&grid));
        }
    }
    Ok(())
}

fn load_record(kind: &str, file: &Path) -> Result<flapboard::records::ContentRecord> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    render::parse_record(kind, &text).with_context(|| format!("Failed to parse {}", file.display()))
}

fn connect(config: &Config) -> Result<VestaboardClient> {
    let key = config::rw_key_from_env()?;
    let retry = RetryPolicy::new(config.retry.backoff(), config::retry_writes_from_env());
    Ok(VestaboardClient::new(config, key, retry))
}
