//! Plain-text timing logs: writing during a sweep, parsing afterwards

pub mod parser;
pub mod record;
pub mod writer;

pub use parser::{
    parse_series, parse_series_str, parse_tradeoff, parse_tradeoff_str, tradeoff_series, Series,
    TradeoffSample,
};
pub use record::LogRecord;
pub use writer::SweepLog;
