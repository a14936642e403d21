//! CLI command implementations

use super::LaunchArgs;
use anyhow::{Context, Result};
use life_bench::config::{Config, LaunchConfig, PlotInput};
use life_bench::journal::{parse_series, parse_tradeoff, tradeoff_series};
use life_bench::plot::ChartData;
use life_bench::scaling::{BaselinePolicy, ParallelFraction, ScalingReport};
use life_bench::sweep::{ProcessLauncher, RunConfiguration, RunResult, SweepRunner};
use std::path::{Path, PathBuf};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = Config::load_or_default(path)?;
    if let Some(p) = path {
        tracing::info!(path = %p.display(), "loaded configuration");
    }
    Ok(config)
}

fn apply_launch_args(launch: &mut LaunchConfig, args: LaunchArgs) {
    if let Some(executable) = args.executable {
        launch.executable = executable;
    }
    if args.no_launcher {
        launch.launcher = None;
    } else if let Some(launcher) = args.launcher {
        launch.launcher = Some(launcher);
    }
    if let Some(grid_size) = args.grid_size {
        launch.grid_size = grid_size;
    }
    if let Some(updates) = args.updates {
        launch.updates = updates;
    }
}

fn baseline_policy(positional: bool, configured: BaselinePolicy) -> BaselinePolicy {
    if positional {
        BaselinePolicy::FirstSample
    } else {
        configured
    }
}

fn print_header(title: &str, launch: &LaunchConfig, runs: usize, log_path: &Path) {
    println!("{}", RULE);
    println!("{}", title);
    println!("{}", RULE);
    println!("  Executable:     {}", launch.executable.display());
    println!(
        "  Launcher:       {}",
        launch
            .launcher
            .as_deref()
            .map(|l| format!("{} {} <n>", l, launch.np_flag))
            .unwrap_or_else(|| "(direct)".to_string())
    );
    println!("  Grid size:      {}", launch.grid_size);
    println!("  Updates:        {}", launch.updates);
    println!("  Configurations: {}", runs);
    println!("  Log:            {}", log_path.display());
    println!("{}", RULE);
    println!();
}

fn print_summary(results: &[RunResult], log_path: &Path) {
    let with_errors: Vec<_> = results.iter().filter(|r| r.errors.is_some()).collect();
    let total: f64 = results.iter().map(RunResult::seconds).sum();

    println!();
    println!("{}", RULE);
    println!("Results Summary");
    println!("{}", RULE);
    println!("  Runs:        {}", results.len());
    println!("  With errors: {}", with_errors.len());
    println!("  Total time:  {:.1}s", total);
    if let Some(fastest) = results
        .iter()
        .min_by(|a, b| a.seconds().total_cmp(&b.seconds()))
    {
        println!(
            "  Fastest:     {} ({:.3}s)",
            fastest.config.describe(),
            fastest.seconds()
        );
    }
    for failed in &with_errors {
        println!("  ✗ {} wrote to stderr", failed.config.describe());
    }
    println!("{}", RULE);
    println!("Timings saved to: {}", log_path.display());
}

fn run_sweep(
    title: &str,
    launch: &LaunchConfig,
    configs: &[RunConfiguration],
    log_path: &Path,
) -> Result<()> {
    print_header(title, launch, configs.len(), log_path);
    let runner = SweepRunner::new(ProcessLauncher::new(launch));
    let results = runner.run(configs, log_path)?;
    print_summary(&results, log_path);
    Ok(())
}

pub fn sweep(
    mut config: Config,
    launch: LaunchArgs,
    ranks: Option<Vec<usize>>,
    max_ranks: Option<usize>,
    log: Option<PathBuf>,
) -> Result<()> {
    apply_launch_args(&mut config.launch, launch);
    if let Some(ranks) = ranks {
        config.sweep.ranks = ranks;
    } else if let Some(max) = max_ranks {
        config.sweep.ranks = (1..=max).collect();
    }
    if let Some(log) = log {
        config.sweep.log_path = log;
    }

    let configs = config.sweep.configurations(&config.launch)?;
    run_sweep(
        "MPI Rank Sweep",
        &config.launch,
        &configs,
        &config.sweep.log_path,
    )
}

pub fn tradeoff(
    mut config: Config,
    launch: LaunchArgs,
    processes: Option<Vec<usize>>,
    threads: Option<Vec<usize>>,
    total_cores: Option<usize>,
    log: Option<PathBuf>,
) -> Result<()> {
    apply_launch_args(&mut config.launch, launch);
    if let Some(processes) = processes {
        config.tradeoff.processes = processes;
    }
    if let Some(threads) = threads {
        config.tradeoff.threads = threads;
    }
    if total_cores.is_some() {
        config.tradeoff.total_cores = total_cores;
    }
    if let Some(log) = log {
        config.tradeoff.log_path = log;
    }

    let configs = config.tradeoff.configurations(&config.launch)?;
    run_sweep(
        "MPI / OpenMP Tradeoff Sweep",
        &config.launch,
        &configs,
        &config.tradeoff.log_path,
    )
}

pub fn plot(
    mut config: Config,
    inputs: Vec<String>,
    parallel_fraction: Option<f64>,
    positional_baseline: bool,
    output: Option<PathBuf>,
    title: Option<String>,
    no_show: bool,
) -> Result<()> {
    if !inputs.is_empty() {
        config.plot.inputs = inputs.iter().map(|s| PlotInput::parse(s)).collect();
    }
    if let Some(output) = output {
        config.plot.output = output;
    }
    if let Some(title) = title {
        config.plot.title = title;
    }
    let plot = config.plot;

    let p = ParallelFraction::new(parallel_fraction.unwrap_or(plot.parallel_fraction))?;
    let policy = baseline_policy(positional_baseline, plot.baseline);

    let mut labelled = Vec::with_capacity(plot.inputs.len());
    for input in &plot.inputs {
        let series = parse_series(&input.path)?;
        println!(
            "Loaded {} records from {} ({})",
            series.len(),
            input.path.display(),
            input.label
        );
        labelled.push((input.label.clone(), series));
    }

    let chart = ChartData::build(&labelled, p, policy)?;
    chart
        .save_and_show(&plot, plot.show && !no_show)
        .with_context(|| format!("failed to write {}", plot.output.display()))?;
    println!("Chart saved to: {}", plot.output.display());
    Ok(())
}

pub fn report(
    config: Config,
    log: PathBuf,
    tradeoff: bool,
    parallel_fraction: Option<f64>,
    positional_baseline: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let p = ParallelFraction::new(parallel_fraction.unwrap_or(config.plot.parallel_fraction))?;
    let policy = baseline_policy(positional_baseline, config.plot.baseline);

    let series = if tradeoff {
        tradeoff_series(&parse_tradeoff(&log)?)
    } else {
        parse_series(&log)?
    };
    if series.is_empty() {
        anyhow::bail!("no timing records in {}", log.display());
    }

    let label = log
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| log.display().to_string());
    let report = ScalingReport::from_series(label, &series, p, policy)
        .with_context(|| format!("cannot build report for {}", log.display()))?;
    report.print_summary();

    if let Some(output_path) = output {
        report.save(&output_path)?;
        println!("\nReport saved to: {}", output_path.display());
    }
    Ok(())
}

pub fn show_config(config: &Config, write: Option<PathBuf>) -> Result<()> {
    match write {
        Some(path) => {
            config.save(&path)?;
            println!("Configuration written to: {}", path.display());
        }
        None => println!("{}", config.to_json()?),
    }
    Ok(())
}
