pub mod launch;
pub mod plot;
pub mod sweep;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use launch::LaunchConfig;
pub use plot::{PlotConfig, PlotInput};
pub use sweep::{SweepConfig, TradeoffConfig};

/// Main harness configuration.
///
/// Defaults match the reference MPI benchmark setup; a JSON file may override
/// any section and missing sections fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub launch: LaunchConfig,
    pub sweep: SweepConfig,
    pub tradeoff: TradeoffConfig,
    pub plot: PlotConfig,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Defaults, or the file at `path` when one is given
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let json = r#"{ "launch": { "launcher": null, "np_flag": "-n",
            "executable": "/opt/game", "grid_size": "1000", "updates": "10",
            "save_flag": "save", "thread_env_var": "OMP_NUM_THREADS" } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.launch.launcher, None);
        assert_eq!(config.launch.grid_size, "1000");
        assert_eq!(config.sweep, SweepConfig::default());
        assert_eq!(config.plot.parallel_fraction, 0.95);
    }
}
