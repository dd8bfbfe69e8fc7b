//! The validation pass: scan a log once, then run the consistency checks.

pub mod checks;
pub mod state;

pub use state::{CountMap, ValidationState};

use crate::Result;
use crate::log::{LogLines, ScanError};
use crate::report::ValidationReport;

use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const DEFAULT_SEPARATOR: &str = ",";

/// Runtime settings for a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Literal field delimiter of the input log.
    pub separator: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl ValidatorConfig {
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

/// Accumulate every line of `reader`. Stops at the first bad line.
pub fn scan<R: BufRead>(reader: R, config: &ValidatorConfig) -> Result<ValidationState, ScanError> {
    let mut state = ValidationState::new();
    for line in LogLines::new(reader, config.separator.as_str()) {
        state.record(&line?);
    }
    Ok(state)
}

pub fn validate_reader<R: BufRead>(
    reader: R,
    config: &ValidatorConfig,
) -> Result<ValidationReport, ScanError> {
    let state = scan(reader, config)?;
    Ok(checks::run_all(&state))
}

/// Validate the log at `path`.
///
/// The file is closed before any check runs. Open, read and parse failures
/// are returned as errors; inconsistencies end up in the report.
pub fn validate(path: impl AsRef<Path>, config: &ValidatorConfig) -> Result<ValidationReport> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), separator = %config.separator, "scanning log");

    let state = {
        let file =
            File::open(path).with_context(|| format!("open log file {}", path.display()))?;
        scan(BufReader::new(file), config)
            .with_context(|| format!("log parse error in {}", path.display()))?
    };

    tracing::debug!(
        lines = state.total_line_count,
        operators = state.total_lines_per_operator.len(),
        sequence_numbers = state.receipt_count_per_sequence_number.len(),
        "scan finished"
    );

    Ok(checks::run_all(&state))
}
