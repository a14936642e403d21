//! Sweep runner against real child processes

#![cfg(unix)]

use anyhow::Result;
use life_bench::config::LaunchConfig;
use life_bench::journal::{parse_series, parse_tradeoff};
use life_bench::sweep::{ProcessLauncher, RunConfiguration, SweepRunner};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Runs `sh -c <script> save`, so the script stands in for the simulation
fn shell_launch(script: &str) -> (LaunchConfig, String, String) {
    let launch = LaunchConfig {
        launcher: None,
        executable: PathBuf::from("sh"),
        thread_env_var: "LIFE_BENCH_THREADS".to_string(),
        ..Default::default()
    };
    (launch, "-c".to_string(), script.to_string())
}

#[test]
fn test_one_record_per_configuration_in_order() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let log_path = temp_dir.path().join("execution_times.txt");

    let (launch, grid, updates) = shell_launch("echo step");
    let configs: Vec<_> = [1, 4, 2, 3]
        .iter()
        .map(|&n| RunConfiguration::new(n, None, &grid, &updates))
        .collect::<Result<_, _>>()?;

    let runner = SweepRunner::new(ProcessLauncher::new(&launch)).with_progress(false);
    let results = runner.run(&configs, &log_path)?;
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r.errors.is_none()));
    assert_eq!(results[0].stdout, "step\n");

    let series = parse_series(&log_path)?;
    let ranks: Vec<_> = series.parameters().collect();
    assert_eq!(ranks, vec![1, 4, 2, 3]);
    assert!(series.times().all(|t| t >= 0.0));
    Ok(())
}

#[test]
fn test_failures_are_logged_and_sweep_continues() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let log_path = temp_dir.path().join("execution_times.txt");

    let (launch, grid, updates) = shell_launch("echo 'halo exchange failed' >&2; exit 3");
    let configs: Vec<_> = (1..=3)
        .map(|n| RunConfiguration::new(n, None, &grid, &updates))
        .collect::<Result<_, _>>()?;

    let runner = SweepRunner::new(ProcessLauncher::new(&launch)).with_progress(false);
    let results = runner.run(&configs, &log_path)?;
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.exit_code == Some(3)));

    let text = fs::read_to_string(&log_path)?;
    assert_eq!(text.matches("Errors for ").count(), 3);
    assert!(text.contains("Errors for 2 ranks:\nhalo exchange failed\n"));
    assert_eq!(parse_series(&log_path)?.len(), 3);
    Ok(())
}

#[test]
fn test_missing_executable_becomes_error_text() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let log_path = temp_dir.path().join("execution_times.txt");

    let launch = LaunchConfig {
        launcher: None,
        executable: temp_dir.path().join("no-such-game"),
        ..Default::default()
    };
    let configs = vec![
        RunConfiguration::new(1, None, "5000", "100")?,
        RunConfiguration::new(2, None, "5000", "100")?,
    ];

    let runner = SweepRunner::new(ProcessLauncher::new(&launch)).with_progress(false);
    let results = runner.run(&configs, &log_path)?;
    assert_eq!(results.len(), 2);
    assert!(results[0].exit_code.is_none());
    assert!(results[0]
        .errors
        .as_deref()
        .is_some_and(|e| e.contains("Failed to spawn")));

    let series = parse_series(&log_path)?;
    assert_eq!(series.parameters().collect::<Vec<_>>(), vec![1, 2]);
    Ok(())
}

#[test]
fn test_thread_count_reaches_child_only() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let log_path = temp_dir.path().join("tradeoff.txt");

    let (launch, grid, updates) = shell_launch("echo \"threads=$LIFE_BENCH_THREADS\" >&2");
    let configs = vec![
        RunConfiguration::new(1, Some(4), &grid, &updates)?,
        RunConfiguration::new(4, Some(1), &grid, &updates)?,
    ];

    let runner = SweepRunner::new(ProcessLauncher::new(&launch)).with_progress(false);
    let results = runner.run(&configs, &log_path)?;
    assert_eq!(results[0].errors.as_deref(), Some("threads=4\n"));
    assert_eq!(results[1].errors.as_deref(), Some("threads=1\n"));
    assert!(std::env::var_os("LIFE_BENCH_THREADS").is_none());

    let text = fs::read_to_string(&log_path)?;
    assert!(text.contains("Errors with 1 MPI processes and 4 OpenMP threads:\nthreads=4\n"));

    let samples = parse_tradeoff(&log_path)?;
    assert_eq!(samples.len(), 2);
    assert_eq!((samples[0].processes, samples[0].threads), (1, 4));
    assert_eq!((samples[1].processes, samples[1].threads), (4, 1));
    Ok(())
}

#[test]
fn test_log_is_truncated_per_sweep() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let log_path = temp_dir.path().join("execution_times.txt");
    fs::write(&log_path, "Ranks: 99, Time: 1.0 seconds\n")?;

    let (launch, grid, updates) = shell_launch("true");
    let configs = vec![RunConfiguration::new(1, None, &grid, &updates)?];
    SweepRunner::new(ProcessLauncher::new(&launch))
        .with_progress(false)
        .run(&configs, &log_path)?;

    let series = parse_series(&log_path)?;
    assert_eq!(series.parameters().collect::<Vec<_>>(), vec![1]);
    Ok(())
}
