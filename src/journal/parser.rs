//! Extracting timing series from sweep logs
//!
//! Parsing is tolerant: any line that does not carry a timing record, such as
//! captured stderr, is skipped.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

static RANKS_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Ranks: (\d+), Time: ([\d.]+) seconds").expect("valid ranks pattern")
});

static TRADEOFF_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"MPI Processes: (\d+), OpenMP Threads: (\d+), Time: ([\d.]+) seconds")
        .expect("valid tradeoff pattern")
});

/// Ordered (parameter, seconds) pairs in order of appearance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    points: Vec<(usize, f64)>,
}

impl Series {
    pub fn new(points: Vec<(usize, f64)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(usize, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn parameters(&self) -> impl Iterator<Item = usize> + '_ {
        self.points.iter().map(|&(n, _)| n)
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(_, t)| t)
    }
}

impl From<Vec<(usize, f64)>> for Series {
    fn from(points: Vec<(usize, f64)>) -> Self {
        Self::new(points)
    }
}

/// One record of a process/thread tradeoff sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeoffSample {
    pub processes: usize,
    pub threads: usize,
    pub seconds: f64,
}

/// Series keyed by process count
pub fn tradeoff_series(samples: &[TradeoffSample]) -> Series {
    samples
        .iter()
        .map(|s| (s.processes, s.seconds))
        .collect::<Vec<_>>()
        .into()
}

pub fn parse_series_str(text: &str) -> Series {
    let points = text
        .lines()
        .filter_map(|line| {
            let caps = RANKS_LINE.captures(line)?;
            let ranks: usize = caps[1].parse().ok()?;
            let seconds: f64 = caps[2].parse().ok()?;
            Some((ranks, seconds))
        })
        .collect();
    Series::new(points)
}

/// Read a rank sweep log. A missing file is an error; no matches is not.
pub fn parse_series<P: AsRef<Path>>(path: P) -> Result<Series> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read log {}", path.display()))?;
    let series = parse_series_str(&text);
    tracing::debug!(path = %path.display(), points = series.len(), "parsed series");
    Ok(series)
}

pub fn parse_tradeoff_str(text: &str) -> Vec<TradeoffSample> {
    text.lines()
        .filter_map(|line| {
            let caps = TRADEOFF_LINE.captures(line)?;
            Some(TradeoffSample {
                processes: caps[1].parse().ok()?,
                threads: caps[2].parse().ok()?,
                seconds: caps[3].parse().ok()?,
            })
        })
        .collect()
}

/// Read a tradeoff sweep log
pub fn parse_tradeoff<P: AsRef<Path>>(path: P) -> Result<Vec<TradeoffSample>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read log {}", path.display()))?;
    Ok(parse_tradeoff_str(&text))
}
