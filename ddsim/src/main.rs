//! ddsim: deal random bridge hands, solve them double dummy, stream CSV.
//!
//! Rows go to stdout; progress and diagnostics go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ddsim::{PipelineConfig, PipelineError, Scoring, StrainChoice};
use ddsim_core::Position;
use ddsim_dds::{BridgeSolverBackend, Denomination};
use log::{debug, error, info};
use std::io;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "ddsim")]
#[command(author, version, about = "Double-dummy simulation of random bridge deals", long_about = None)]
struct Args {
    /// Number of deals to generate
    #[arg(short = 'n', long = "count", default_value_t = 1000, value_name = "N")]
    count: usize,

    /// Deals per work unit
    #[arg(short = 'b', long = "batch-size", default_value_t = 100, value_name = "N")]
    batch_size: usize,

    /// Most deals handed to the solver in one call
    #[arg(long = "solver-batch", default_value_t = ddsim_dds::DEFAULT_MAX_BATCH, value_name = "N")]
    solver_batch: usize,

    /// Worker threads (0 = available parallelism less two)
    #[arg(short = 'j', long = "workers", default_value_t = 0, value_name = "N")]
    workers: usize,

    /// Base random seed; worker i uses seed + i (defaults to OS entropy)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Declaring seat
    #[arg(long, value_enum, default_value_t = Seat::N)]
    declarer: Seat,

    /// Strain the tricks are read for
    #[arg(long, value_enum, default_value_t = Strain::BestFit)]
    strain: Strain,

    /// Solve all 20 table cells instead of only the declarer's
    #[arg(long, default_value_t = false)]
    full_table: bool,

    /// Leave out the CSV header line
    #[arg(long, default_value_t = false)]
    no_header: bool,

    /// Minimum seconds between progress lines
    #[arg(long = "progress-secs", default_value_t = 2, value_name = "SECS")]
    progress_secs: u64,

    /// Enable verbose logging (use -vv for trace output)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Seat {
    N,
    E,
    S,
    W,
}

impl From<Seat> for Position {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::N => Position::North,
            Seat::E => Position::East,
            Seat::S => Position::South,
            Seat::W => Position::West,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strain {
    BestFit,
    Spades,
    Hearts,
    Diamonds,
    Clubs,
    Notrump,
}

impl From<Strain> for StrainChoice {
    fn from(strain: Strain) -> Self {
        match strain {
            Strain::BestFit => StrainChoice::BestFit,
            Strain::Spades => StrainChoice::Fixed(Denomination::Spades),
            Strain::Hearts => StrainChoice::Fixed(Denomination::Hearts),
            Strain::Diamonds => StrainChoice::Fixed(Denomination::Diamonds),
            Strain::Clubs => StrainChoice::Fixed(Denomination::Clubs),
            Strain::Notrump => StrainChoice::Fixed(Denomination::NoTrump),
        }
    }
}

impl Args {
    fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            total_deals: self.count,
            batch_size: self.batch_size,
            max_solver_batch: self.solver_batch,
            workers: self.workers,
            seed: self.seed,
            scoring: Scoring {
                declarer: self.declarer.into(),
                strain: self.strain.into(),
            },
            full_table: self.full_table,
            write_header: !self.no_header,
            progress_interval: Duration::from_secs(self.progress_secs),
        }
    }
}

fn simulate(args: &Args) -> Result<()> {
    let config = args.to_config();
    debug!("{:?}", config);

    let backend = BridgeSolverBackend::new(config.solve_scope());
    let stdout = io::stdout();
    let summary = ddsim::run(&config, backend, stdout.lock()).context("Simulation failed")?;

    info!("done: {}", summary);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.quiet {
        "warn"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    info!("ddsim v{}", env!("CARGO_PKG_VERSION"));

    match simulate(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            let code = e
                .downcast_ref::<PipelineError>()
                .map_or(2, PipelineError::exit_code);
            ExitCode::from(code)
        }
    }
}
