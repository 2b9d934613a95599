//! Dungeon level generator
//!
//! Builds one level and prints it as ASCII.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use delve_core::{GeneratorConfig, LevelGenerator, Random};

/// Generate a random dungeon level
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Generate a dungeon level", long_about = None)]
struct Args {
    /// Random seed (random if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Level width, overrides the config file
    #[arg(short = 'W', long = "width")]
    width: Option<i32>,

    /// Level height, overrides the config file
    #[arg(short = 'H', long = "height")]
    height: Option<i32>,

    /// Room placement attempts, overrides the config file
    #[arg(short = 'a', long = "attempts")]
    attempts: Option<u32>,

    /// JSON generator configuration
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print a JSON summary of rooms and generation stats after the map
    #[arg(long = "stats")]
    stats: bool,
}

impl Args {
    fn generator_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => GeneratorConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(attempts) = self.attempts {
            config.placement_attempts = attempts;
        }
        Ok(config)
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "delve=info,delve_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = args.generator_config()?;
    let generator = LevelGenerator::new(config).context("invalid generator configuration")?;

    let mut rng = match args.seed {
        Some(seed) => Random::new(seed),
        None => Random::from_entropy(),
    };
    info!(seed = rng.seed(), "generating level");

    let level = generator.generate(&mut rng);
    print!("{}", level.dump());

    if args.stats {
        println!("{}", serde_json::to_string_pretty(&level.summary())?);
    }
    Ok(())
}
