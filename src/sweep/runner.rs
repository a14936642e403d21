//! Sequential sweep over run configurations

use super::launcher::Launcher;
use super::types::{RunConfiguration, RunResult};
use crate::journal::SweepLog;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Runs every configuration in order, one blocking launch at a time.
///
/// A failing configuration is logged and the sweep continues; only log I/O
/// errors abort it.
pub struct SweepRunner<L: Launcher> {
    launcher: L,
    show_progress: bool,
}

impl<L: Launcher> SweepRunner<L> {
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run the sweep, creating (or truncating) the log at `log_path`
    pub fn run<P: AsRef<Path>>(
        &self,
        configs: &[RunConfiguration],
        log_path: P,
    ) -> Result<Vec<RunResult>> {
        let mut log = SweepLog::create(log_path.as_ref())?;
        self.run_into(configs, &mut log)
    }

    /// Run the sweep against an already open log
    pub fn run_into<W: Write>(
        &self,
        configs: &[RunConfiguration],
        log: &mut SweepLog<W>,
    ) -> Result<Vec<RunResult>> {
        let pb = self.progress_bar(configs.len());
        let mut results = Vec::with_capacity(configs.len());

        for config in configs {
            let what = config.describe();
            pb.set_message(what.clone());
            pb.println(format!("Running with {}", what));

            let start = Instant::now();
            let output = self.launcher.launch(config);
            let elapsed = start.elapsed();

            let result = RunResult::new(config.clone(), elapsed, output);
            pb.println(finished_message(config, result.seconds()));

            log.append(&result)?;

            if result.exit_code != Some(0) {
                tracing::warn!(
                    configuration = %what,
                    exit_code = ?result.exit_code,
                    "external program did not exit cleanly"
                );
            }
            if !result.stdout.is_empty() {
                pb.println(result.stdout.trim_end());
            }
            if let Some(errors) = &result.errors {
                pb.println(errors.trim_end());
            }
            pb.println(done_message(config));

            results.push(result);
            pb.inc(1);
        }

        pb.finish_with_message("Sweep complete");
        tracing::info!(runs = results.len(), "sweep complete");
        Ok(results)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        pb
    }
}

/// Rank sweeps name the rank count; tradeoff runs already announced their pair
fn finished_message(config: &RunConfiguration, seconds: f64) -> String {
    match config.threads() {
        Some(_) => format!("Finished in {} seconds", seconds),
        None => format!("Finished running with {} in {} seconds", config.describe(), seconds),
    }
}

fn done_message(config: &RunConfiguration) -> &'static str {
    match config.threads() {
        Some(_) => "Configuration done",
        None => "Done",
    }
}
