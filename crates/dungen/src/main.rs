//! Dungeon layout generator
//!
//! Generates a dungeon, prints a summary and optionally an ASCII preview,
//! and writes the layers as a Tiled JSON map.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{Level, LevelFilter, Log, Metadata, Record, info};

use dg_core::{GenConfig, generate};
use dg_export::{TilesetInfo, save_tiled, to_tiled};

/// Procedural dungeon layout generator
#[derive(Parser, Debug)]
#[command(name = "dungen")]
#[command(author, version, about = "Generate a room-and-corridor dungeon map", long_about = None)]
struct Args {
    /// Map width in tiles
    #[arg(short = 'x', long = "width")]
    width: Option<usize>,

    /// Map height in tiles
    #[arg(short = 'y', long = "height")]
    height: Option<usize>,

    /// Random seed (drawn from entropy if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// JSON config file; flags override its values
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Write the map as Tiled JSON to this path
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print an ASCII preview of the walls layer
    #[arg(long = "ascii")]
    ascii: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

/// Writes log records to stderr
struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            Level::Info => eprintln!("{}", record.args()),
            level => eprintln!("[{}] {}: {}", level, record.target(), record.args()),
        }
    }

    fn flush(&self) {}
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    log::set_boxed_logger(Box::new(StderrLogger { level }))
        .context("failed to install logger")?;
    log::set_max_level(level);
    Ok(())
}

/// Config file first, then flags on top
fn build_config(args: &Args) -> Result<GenConfig> {
    let base = match &args.config {
        Some(path) => GenConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GenConfig::default(),
    };

    let config = GenConfig::new(
        args.width.unwrap_or(base.width),
        args.height.unwrap_or(base.height),
    );
    Ok(match args.seed.or(base.seed) {
        Some(seed) => config.with_seed(seed),
        None => config,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = build_config(&args)?;
    let mut rng = config.rng();
    let dungeon = generate(&config, &mut rng);

    println!(
        "{}x{} seed {}: {} rooms ({} reachable), {} connectors, {} doorways",
        dungeon.width(),
        dungeon.height(),
        dungeon.seed,
        dungeon.rooms.len(),
        dungeon.reachable_rooms().len(),
        dungeon.connectors.len(),
        dungeon.holes
    );

    if args.ascii {
        println!("{}", dungeon.ascii());
    }

    if let Some(path) = &args.output {
        let map = to_tiled(&dungeon.layers, &TilesetInfo::default());
        save_tiled(&map, path).with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    Ok(())
}
