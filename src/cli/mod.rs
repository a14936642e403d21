pub mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "life-bench")]
#[command(about = "Scaling sweeps and Amdahl's Law plots for a Game of Life kernel", long_about = None)]
struct Cli {
    /// JSON configuration file (defaults are used for anything it omits)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for how the simulation is launched
#[derive(Args, Debug, Default)]
pub struct LaunchArgs {
    /// Path to the simulation executable
    #[arg(long)]
    pub executable: Option<PathBuf>,
    /// Process launcher (e.g. mpirun)
    #[arg(long, conflicts_with = "no_launcher")]
    pub launcher: Option<String>,
    /// Run the executable directly instead of through a launcher
    #[arg(long)]
    pub no_launcher: bool,
    /// Grid size passed to the simulation
    #[arg(long)]
    pub grid_size: Option<String>,
    /// Number of updates passed to the simulation
    #[arg(long)]
    pub updates: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Time the simulation across a range of MPI rank counts
    Sweep {
        #[command(flatten)]
        launch: LaunchArgs,
        /// Rank counts to run, in order (comma-separated)
        #[arg(long, value_delimiter = ',')]
        ranks: Option<Vec<usize>>,
        /// Run every rank count from 1 to this value
        #[arg(long, conflicts_with = "ranks")]
        max_ranks: Option<usize>,
        /// Timing log to create
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Time complementary MPI process / OpenMP thread splits
    Tradeoff {
        #[command(flatten)]
        launch: LaunchArgs,
        /// MPI process counts (comma-separated)
        #[arg(long, value_delimiter = ',')]
        processes: Option<Vec<usize>>,
        /// OpenMP thread counts, paired with --processes (comma-separated)
        #[arg(long, value_delimiter = ',')]
        threads: Option<Vec<usize>>,
        /// Total cores the splits should use
        #[arg(long)]
        total_cores: Option<usize>,
        /// Timing log to create
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Plot observed run times against Amdahl's Law
    Plot {
        /// Log to plot as PATH=LABEL (repeatable)
        #[arg(long = "input", short = 'i')]
        inputs: Vec<String>,
        /// Parallel fraction of the workload
        #[arg(long)]
        parallel_fraction: Option<f64>,
        /// Use the first record as baseline instead of the single-rank run
        #[arg(long)]
        positional_baseline: bool,
        /// Output image
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Chart title
        #[arg(long)]
        title: Option<String>,
        /// Do not open the chart after saving
        #[arg(long)]
        no_show: bool,
    },
    /// Print observed speedup and efficiency next to Amdahl's prediction
    Report {
        /// Timing log to analyse
        log: PathBuf,
        /// Treat the log as a process/thread tradeoff log
        #[arg(long)]
        tradeoff: bool,
        /// Parallel fraction of the workload
        #[arg(long)]
        parallel_fraction: Option<f64>,
        /// Use the first record as baseline instead of the single-rank run
        #[arg(long)]
        positional_baseline: bool,
        /// Save the report to a JSON file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config {
        /// Write it to this file instead
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Sweep {
            launch,
            ranks,
            max_ranks,
            log,
        } => commands::sweep(config, launch, ranks, max_ranks, log),
        Commands::Tradeoff {
            launch,
            processes,
            threads,
            total_cores,
            log,
        } => commands::tradeoff(config, launch, processes, threads, total_cores, log),
        Commands::Plot {
            inputs,
            parallel_fraction,
            positional_baseline,
            output,
            title,
            no_show,
        } => commands::plot(
            config,
            inputs,
            parallel_fraction,
            positional_baseline,
            output,
            title,
            no_show,
        ),
        Commands::Report {
            log,
            tradeoff,
            parallel_fraction,
            positional_baseline,
            output,
        } => commands::report(
            config,
            log,
            tradeoff,
            parallel_fraction,
            positional_baseline,
            output,
        ),
        Commands::Config { write } => commands::show_config(&config, write),
    }
}
