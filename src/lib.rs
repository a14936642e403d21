//! Scaling benchmarks for an external Game of Life kernel
//!
//! The simulation itself is an opaque executable, usually launched through
//! `mpirun`. This crate sweeps its parallelism settings, records wall-clock
//! timings in a plain-text log, and compares the measurements against
//! Amdahl's Law.
//!
//! ## Main Components
//!
//! - `sweep`: launching the executable once per configuration and timing it
//! - `journal`: the timing log format, its writer and its parser
//! - `scaling`: Amdahl's Law predictions and scaling reports
//! - `plot`: observed vs theoretical comparison charts
//! - `config`: configuration management

pub mod config;
pub mod journal;
pub mod plot;
pub mod scaling;
pub mod sweep;

pub use config::Config;
pub use journal::{parse_series, Series};
pub use scaling::{amdahl_speedup, theoretical_curve};

/// Library errors
pub use anyhow::{Error, Result};
