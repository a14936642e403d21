use crate::scaling::BaselinePolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One log file to plot and its legend label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotInput {
    pub path: PathBuf,
    pub label: String,
}

impl PlotInput {
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }

    /// Parse `path=label`, splitting at the last `=`; a bare path uses its
    /// file stem as the label
    pub fn parse(spec: &str) -> Self {
        match spec.rsplit_once('=') {
            Some((path, label)) if !label.is_empty() => Self::new(path, label),
            Some((path, _)) => Self::from_path(path),
            None => Self::from_path(spec),
        }
    }

    fn from_path(path: &str) -> Self {
        let path = PathBuf::from(path);
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, label }
    }
}

/// Comparison chart configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    pub inputs: Vec<PlotInput>,
    pub parallel_fraction: f64,
    pub baseline: BaselinePolicy,
    pub output: PathBuf,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    /// Open the saved image in a viewer afterwards (best effort)
    pub show: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            inputs: vec![
                PlotInput::new("execution_times_5000.txt", "5,000x5,000"),
                PlotInput::new("execution_times_10000.txt", "10,000x10,000"),
                PlotInput::new("execution_times_20000.txt", "20,000x20,000"),
            ],
            parallel_fraction: 0.95,
            baseline: BaselinePolicy::SingleWorker,
            output: PathBuf::from("ranks_vs_time.png"),
            title: "Runtime of Game of Life simulations - 100 updates as a function of MPI ranks"
                .to_string(),
            x_label: "Ranks".to_string(),
            y_label: "Run Time (s)".to_string(),
            width: 1400,
            height: 1000,
            show: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_input_with_label() {
        let input = PlotInput::parse("logs/execution_times_5000.txt=5k grid");
        assert_eq!(input.path, PathBuf::from("logs/execution_times_5000.txt"));
        assert_eq!(input.label, "5k grid");
    }

    #[test]
    fn test_plot_input_bare_path_uses_stem() {
        let input = PlotInput::parse("logs/execution_times_5000.txt");
        assert_eq!(input.label, "execution_times_5000");

        let input = PlotInput::parse("run.txt=");
        assert_eq!(input.label, "run");
    }

    #[test]
    fn test_plot_input_path_containing_equals() {
        let input = PlotInput::parse("runs/grid=5000/execution_times.txt=5k");
        assert_eq!(input.path, PathBuf::from("runs/grid=5000/execution_times.txt"));
        assert_eq!(input.label, "5k");
    }
}
