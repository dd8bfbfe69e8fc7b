//! Parsing for the benchmark output log.

pub mod parse;
pub mod row;

pub use parse::{LineError, LogLines, ScanError, parse_line};
pub use row::LogLine;
