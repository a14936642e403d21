pub mod launcher;
pub mod runner;
pub mod types;

pub use launcher::{Launcher, ProcessLauncher};
pub use runner::SweepRunner;
pub use types::{LaunchOutput, RunConfiguration, RunResult, SweepError};
