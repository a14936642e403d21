pub mod chart;
pub mod display;

pub use chart::{ChartData, Curve, PlotError};
pub use display::show_best_effort;
