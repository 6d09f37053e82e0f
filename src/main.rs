use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{LevelFilter, WriteLogger};

use blocksnek::app;
use blocksnek::config::Config;
use blocksnek::session::Session;
use blocksnek::terminal::TerminalGuard;
use blocksnek::timer::IntervalTicker;

#[derive(Parser)]
#[command(name = "blocksnek")]
#[command(version, about = "Snake on a bordered grid")]
struct Cli {
    /// Width of the drawing surface
    #[arg(long, default_value_t = 600)]
    surface_width: u32,

    /// Height of the drawing surface
    #[arg(long, default_value_t = 450)]
    surface_height: u32,

    /// Size of one grid cell; must divide both surface dimensions
    #[arg(long, default_value_t = 15)]
    cell_size: u32,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log
    #[arg(long, default_value = "blocksnek.log")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            surface_width: self.surface_width,
            surface_height: self.surface_height,
            cell_size: self.cell_size,
            tick_period: Duration::from_millis(self.tick_ms),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(level, simplelog::Config::default(), log_file)
        .context("Failed to initialize logger")?;

    info!("Starting blocksnek");

    let rng = match cli.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    // Bad geometry is rejected before the terminal is touched.
    let session = Session::new(cli.config(), rng, IntervalTicker::new())
        .context("Invalid configuration")?;

    // Setup terminal; the guard puts it back even if the loop panics
    let guard = TerminalGuard::enter().context("Failed to set up terminal")?;
    let backend = CrosstermBackend::new(io::stdout());
    let result = Terminal::new(backend)
        .context("Failed to create terminal")
        .and_then(|mut terminal| app::run(&mut terminal, session).context("Game loop failed"));
    if let Err(e) = &result {
        error!("{:#}", e);
    }

    let restored = guard.restore().context("Failed to restore terminal");
    result.and(restored)
}
