use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the external simulation binary is launched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Process launcher (e.g. `mpirun`). `None` runs the executable directly.
    pub launcher: Option<String>,
    /// Launcher flag that takes the worker count
    pub np_flag: String,
    pub executable: PathBuf,
    pub grid_size: String,
    pub updates: String,
    /// Positional literal asking the simulation to save its final grid
    pub save_flag: String,
    /// Environment variable read by the executable for its thread count
    pub thread_env_var: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            launcher: Some("mpirun".to_string()),
            np_flag: "-np".to_string(),
            executable: PathBuf::from("build/release/src/game"),
            grid_size: "5000".to_string(),
            updates: "100".to_string(),
            save_flag: "save".to_string(),
            thread_env_var: "OMP_NUM_THREADS".to_string(),
        }
    }
}
