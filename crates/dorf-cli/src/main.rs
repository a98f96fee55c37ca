//! CLI frontend for the Dorfleben village simulation.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dorf",
    about = "Dorfleben, a tick-based village simulation",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    world: WorldArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where the world comes from and where it goes.
#[derive(Args, Debug, Clone, Default)]
pub struct WorldArgs {
    /// JSON file holding the saved world (created on first mutation)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// JSON file with simulation settings (default: built-in village)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Advance the world by one or more days
    Tick {
        /// Number of days to simulate
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        multiplier: i64,

        /// Print the tick summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the current world
    State {
        /// Print the full world as JSON
        #[arg(long)]
        json: bool,
    },

    /// Return the world to day 0
    Reset,

    /// Show recent day logs
    Logs {
        /// Maximum number of days to show
        #[arg(short, long, default_value = "10", allow_negative_numbers = true)]
        limit: i64,

        /// Print the logs as JSON
        #[arg(long)]
        json: bool,
    },

    /// Advance the world one day at a time on a fixed interval
    Run {
        /// Number of days to run
        #[arg(short, long, default_value = "7")]
        days: u32,

        /// Milliseconds between days
        #[arg(short, long, default_value = "1000")]
        interval_ms: u64,
    },

    /// Read JSON commands from stdin and answer on stdout, one per line
    Serve,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DORF_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Tick { multiplier, json } => commands::tick::run(&cli.world, multiplier, json),
        Commands::State { json } => commands::state::run(&cli.world, json),
        Commands::Reset => commands::reset::run(&cli.world),
        Commands::Logs { limit, json } => commands::logs::run(&cli.world, limit, json),
        Commands::Run { days, interval_ms } => commands::run::run(&cli.world, days, interval_ms),
        Commands::Serve => commands::serve::run(&cli.world),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
