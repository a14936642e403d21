//! Launching the external simulation binary

use super::types::{LaunchOutput, RunConfiguration};
use crate::config::LaunchConfig;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

/// Runs one configuration to completion and captures its output.
///
/// Implementations must not fail: launch errors are reported through
/// `LaunchOutput::stderr` so the sweep can log them and move on.
pub trait Launcher {
    fn launch(&self, config: &RunConfiguration) -> LaunchOutput;
}

/// Launches the executable as a child process, optionally through `mpirun`
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    launcher: Option<String>,
    np_flag: String,
    executable: PathBuf,
    save_flag: String,
    thread_env_var: String,
}

impl ProcessLauncher {
    pub fn new(config: &LaunchConfig) -> Self {
        Self {
            launcher: config.launcher.clone(),
            np_flag: config.np_flag.clone(),
            executable: config.executable.clone(),
            save_flag: config.save_flag.clone(),
            thread_env_var: config.thread_env_var.clone(),
        }
    }

    /// Program and arguments for one configuration
    pub fn command_line(&self, config: &RunConfiguration) -> (OsString, Vec<OsString>) {
        let sim_args = [
            OsString::from(config.grid_size()),
            OsString::from(config.updates()),
            OsString::from(&self.save_flag),
        ];

        match &self.launcher {
            Some(launcher) => {
                let mut args = vec![
                    OsString::from(&self.np_flag),
                    OsString::from(config.processes().to_string()),
                    self.executable.clone().into_os_string(),
                ];
                args.extend(sim_args);
                (OsString::from(launcher), args)
            }
            None => (self.executable.clone().into_os_string(), sim_args.to_vec()),
        }
    }

    fn command(&self, config: &RunConfiguration) -> Command {
        let (program, args) = self.command_line(config);
        let mut cmd = Command::new(program);
        cmd.args(args);
        // Scoped to this child only; the harness environment is left untouched
        if let Some(threads) = config.threads() {
            cmd.env(&self.thread_env_var, threads.to_string());
        }
        cmd
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, config: &RunConfiguration) -> LaunchOutput {
        let mut cmd = self.command(config);
        tracing::debug!(command = ?cmd, "launching");

        match cmd.output() {
            Ok(output) => LaunchOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                exit_code: output.status.code(),
            },
            Err(e) => {
                let (program, _) = self.command_line(config);
                tracing::warn!(error = %e, "failed to spawn {}", program.to_string_lossy());
                LaunchOutput {
                    stdout: String::new(),
                    stderr: format!("Failed to spawn {}: {}", program.to_string_lossy(), e),
                    exit_code: None,
                }
            }
        }
    }
}
