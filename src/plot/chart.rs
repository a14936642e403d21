//! Observed vs Amdahl's Law comparison chart

use crate::config::PlotConfig;
use crate::journal::Series;
use crate::scaling::{theoretical_curve, BaselinePolicy, ParallelFraction, ScalingError};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("no timing records for '{0}'")]
    EmptySeries(String),

    #[error("no positive run times to place on a log axis")]
    NoPositiveTimes,

    #[error("theoretical curve for '{label}': {source}")]
    Scaling {
        label: String,
        #[source]
        source: ScalingError,
    },

    #[error("failed to render chart: {0}")]
    Render(String),
}

const PALETTE: [RGBColor; 6] = [RED, BLUE, GREEN, MAGENTA, CYAN, BLACK];

/// Log-axis padding factor applied below the minimum and above the maximum
const Y_PADDING: f64 = 1.25;

#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    /// Palette slot shared by an input's observed and theoretical curves
    pub color: usize,
    pub theoretical: bool,
}

/// Everything needed to draw the chart, independent of the backend
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub curves: Vec<Curve>,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

impl ChartData {
    /// One observed and one theoretical curve per labelled series
    pub fn build(
        inputs: &[(String, Series)],
        p: ParallelFraction,
        policy: BaselinePolicy,
    ) -> Result<Self, PlotError> {
        let mut curves = Vec::with_capacity(inputs.len() * 2);

        for (color, (label, series)) in inputs.iter().enumerate() {
            if series.is_empty() {
                return Err(PlotError::EmptySeries(label.clone()));
            }
            let predicted =
                theoretical_curve(series, p, policy).map_err(|source| PlotError::Scaling {
                    label: label.clone(),
                    source,
                })?;

            curves.push(Curve {
                label: format!("{} Observed", label),
                points: series.points().iter().map(|&(n, t)| (n as f64, t)).collect(),
                color,
                theoretical: false,
            });
            curves.push(Curve {
                label: format!("{} Theoretical P = {}", label, p.value()),
                points: predicted.into_iter().map(|(n, t)| (n as f64, t)).collect(),
                color,
                theoretical: true,
            });
        }

        let x_range = x_range(&curves);
        let y_range = y_range(&curves)?;
        Ok(Self {
            curves,
            x_range,
            y_range,
        })
    }

    /// Draw to a PNG at `config.output`
    pub fn render(&self, config: &PlotConfig) -> Result<(), PlotError> {
        let root =
            BitMapBackend::new(&config.output, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(self.x_range.clone(), self.y_range.clone().log_scale())
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc(&config.x_label)
            .y_desc(&config.y_label)
            .draw()
            .map_err(render_err)?;

        for curve in &self.curves {
            let color = PALETTE[curve.color % PALETTE.len()];
            // Log axis cannot place non-positive times
            let points: Vec<_> = curve.points.iter().copied().filter(|&(_, t)| t > 0.0).collect();

            if curve.theoretical {
                chart
                    .draw_series(DashedLineSeries::new(points, 10, 6, color.stroke_width(2)))
                    .map_err(render_err)?
                    .label(curve.label.clone())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 10, y)], color.stroke_width(2))
                    });
            } else {
                chart
                    .draw_series(LineSeries::new(points, color.stroke_width(2)))
                    .map_err(render_err)?
                    .label(curve.label.clone())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        tracing::info!(path = %config.output.display(), "chart saved");
        Ok(())
    }

    /// Write the PNG, then open it in the platform viewer if `show` is set.
    ///
    /// Returns whether a viewer was launched.
    pub fn save_and_show(&self, config: &PlotConfig, show: bool) -> Result<bool, PlotError> {
        self.save_and_show_with(config, show, super::show_best_effort)
    }

    /// [`ChartData::save_and_show`] with a caller supplied viewer; the viewer
    /// only runs once the image is on disk.
    pub fn save_and_show_with<F>(
        &self,
        config: &PlotConfig,
        show: bool,
        viewer: F,
    ) -> Result<bool, PlotError>
    where
        F: FnOnce(&Path) -> bool,
    {
        self.render(config)?;
        Ok(show && viewer(&config.output))
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}

fn x_range(curves: &[Curve]) -> Range<f64> {
    let (lo, hi) = curves
        .iter()
        .flat_map(|c| c.points.iter().map(|&(x, _)| x))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
    if lo < hi {
        lo..hi
    } else {
        // Single parameter value
        (lo - 1.0).max(0.0)..lo + 1.0
    }
}

fn y_range(curves: &[Curve]) -> Result<Range<f64>, PlotError> {
    let (lo, hi) = curves
        .iter()
        .flat_map(|c| c.points.iter().map(|&(_, y)| y))
        .filter(|&y| y > 0.0 && y.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    if lo > hi {
        return Err(PlotError::NoPositiveTimes);
    }
    Ok(lo / Y_PADDING..hi * Y_PADDING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn p95() -> ParallelFraction {
        ParallelFraction::new(0.95).unwrap()
    }

    #[test]
    fn test_two_curves_per_input_sharing_color() {
        let inputs = vec![
            ("5k".to_string(), Series::new(vec![(1, 10.0), (2, 6.0), (4, 4.0)])),
            ("10k".to_string(), Series::new(vec![(1, 40.0), (2, 22.0)])),
        ];
        let data = ChartData::build(&inputs, p95(), BaselinePolicy::SingleWorker).unwrap();

        assert_eq!(data.curves.len(), 4);
        assert_eq!(data.curves[0].label, "5k Observed");
        assert_eq!(data.curves[1].label, "5k Theoretical P = 0.95");
        assert!(data.curves[1].theoretical);
        assert_eq!(data.curves[0].color, data.curves[1].color);
        assert_ne!(data.curves[1].color, data.curves[2].color);
        assert_eq!(data.curves[1].points[0], (1.0, 10.0));
    }

    #[test]
    fn test_ranges_cover_all_curves() {
        let inputs = vec![("a".to_string(), Series::new(vec![(1, 10.0), (8, 2.0)]))];
        let data = ChartData::build(&inputs, p95(), BaselinePolicy::SingleWorker).unwrap();

        assert_eq!(data.x_range, 1.0..8.0);
        let predicted_min = 10.0 / crate::scaling::amdahl_speedup(8, 0.95);
        let expected_lo = predicted_min.min(2.0) / Y_PADDING;
        assert!((data.y_range.start - expected_lo).abs() < 1e-12);
        assert!((data.y_range.end - 10.0 * Y_PADDING).abs() < 1e-12);
    }

    #[test]
    fn test_single_point_range_is_widened() {
        let inputs = vec![("a".to_string(), Series::new(vec![(1, 3.0)]))];
        let data = ChartData::build(&inputs, p95(), BaselinePolicy::SingleWorker).unwrap();
        assert_eq!(data.x_range, 0.0..2.0);
        assert!(data.y_range.start < 3.0 && data.y_range.end > 3.0);
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let inputs = vec![("missing".to_string(), Series::default())];
        let err = ChartData::build(&inputs, p95(), BaselinePolicy::SingleWorker).unwrap_err();
        assert!(matches!(err, PlotError::EmptySeries(ref l) if l == "missing"));
    }

    #[test]
    fn test_missing_baseline_names_input() {
        let inputs = vec![("20k".to_string(), Series::new(vec![(2, 5.0)]))];
        let err = ChartData::build(&inputs, p95(), BaselinePolicy::SingleWorker).unwrap_err();
        assert!(err.to_string().contains("20k"));
    }

    fn sample_chart() -> ChartData {
        let inputs = vec![("5k".to_string(), Series::new(vec![(1, 10.0), (2, 6.0), (4, 4.0)]))];
        ChartData::build(&inputs, p95(), BaselinePolicy::SingleWorker).unwrap()
    }

    #[test]
    fn test_render_writes_png() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("ranks_vs_time.png");
        let config = PlotConfig {
            output: output.clone(),
            ..Default::default()
        };

        sample_chart().render(&config).unwrap();

        let meta = std::fs::metadata(&output).unwrap();
        assert!(meta.len() > 0);
    }

    #[test]
    fn test_viewer_runs_after_image_is_saved() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("chart.png");
        let config = PlotConfig {
            output: output.clone(),
            ..Default::default()
        };

        let mut seen = None;
        let shown = sample_chart()
            .save_and_show_with(&config, true, |path| {
                seen = Some(std::fs::metadata(path).map(|m| m.len()).unwrap_or(0));
                true
            })
            .unwrap();

        assert!(shown);
        assert!(seen.is_some_and(|len| len > 0));
    }

    #[test]
    fn test_viewer_skipped_when_show_disabled() {
        let dir = TempDir::new().unwrap();
        let config = PlotConfig {
            output: dir.path().join("chart.png"),
            ..Default::default()
        };

        let shown = sample_chart()
            .save_and_show_with(&config, false, |_| panic!("viewer must not run"))
            .unwrap();

        assert!(!shown);
        assert!(config.output.exists());
    }

    #[test]
    fn test_viewer_not_called_when_render_fails() {
        let dir = TempDir::new().unwrap();
        let config = PlotConfig {
            output: dir.path().join("missing_dir").join("chart.png"),
            ..Default::default()
        };

        let mut called = false;
        let result = sample_chart().save_and_show_with(&config, true, |_| {
            called = true;
            true
        });

        assert!(result.is_err());
        assert!(!called);
    }
}
