//! Consistency checks for the output log of a parallel stream-processing
//! benchmark.
//!
//! Each log line is `timestamp,sequence_number,operator_name,operator_count`.
//! A single pass accumulates per-operator and per-sequence-number counts;
//! the checks then compare them against each other:
//! - each operator's highest reported running count equals its line count
//! - every sequence number was received once per parallel source
//! - the line total matches the sequence-number range and the per-operator sum

pub mod cli;
pub mod log;
pub mod report;
pub mod validate;

pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;

pub use log::{LineError, LogLine, ScanError};
pub use report::{Discrepancy, ValidationReport};
pub use validate::{ValidatorConfig, validate, validate_reader};
