use crate::log::row::LogLine;
use std::io::{self, BufRead, Lines};
use thiserror::Error;

/// Why a single line could not be turned into a [`LogLine`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("field separator must not be empty")]
    EmptySeparator,

    #[error("expected 4 fields, found {found}")]
    FieldCount { found: usize },

    #[error("{field} is not a non-negative integer: {value:?}")]
    NotAnInteger { field: &'static str, value: String },
}

/// Fatal error raised while scanning a log. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("read error at line {line}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("malformed line {line}")]
    Malformed {
        line: usize,
        #[source]
        source: LineError,
    },
}

impl ScanError {
    pub fn line(&self) -> usize {
        match self {
            ScanError::Io { line, .. } | ScanError::Malformed { line, .. } => *line,
        }
    }
}

/// Parse one log line.
///
/// Expected fields (separated by `separator`):
/// timestamp  sequence_number  operator_name  operator_count
///
/// Example (default separator):
/// 1496912013512,17,Source: Custom Source,18
pub fn parse_line(line: &str, separator: &str) -> Result<LogLine, LineError> {
    if separator.is_empty() {
        return Err(LineError::EmptySeparator);
    }

    let fields: Vec<&str> = line.split(separator).collect();
    let &[timestamp, sequence_number, operator_name, operator_count] = fields.as_slice() else {
        return Err(LineError::FieldCount {
            found: fields.len(),
        });
    };

    Ok(LogLine {
        timestamp: timestamp.to_string(),
        sequence_number: parse_count("sequence number", sequence_number)?,
        operator_name: operator_name.trim().to_string(),
        operator_count: parse_count("operator count", operator_count)?,
    })
}

// Surrounding whitespace is tolerated on numeric fields.
fn parse_count(field: &'static str, raw: &str) -> Result<u64, LineError> {
    let raw = raw.trim();
    raw.parse().map_err(|_| LineError::NotAnInteger {
        field,
        value: raw.to_string(),
    })
}

/// Streaming reader over a log, one [`LogLine`] per input line.
pub struct LogLines<R> {
    lines: Lines<R>,
    separator: String,
    lineno: usize,
}

impl<R: BufRead> LogLines<R> {
    pub fn new(reader: R, separator: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            separator: separator.into(),
            lineno: 0,
        }
    }
}

impl<R: BufRead> Iterator for LogLines<R> {
    type Item = Result<LogLine, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        self.lineno += 1;
        let line = match line {
            Ok(l) => l,
            Err(source) => {
                return Some(Err(ScanError::Io {
                    line: self.lineno,
                    source,
                }));
            }
        };
        Some(
            parse_line(&line, &self.separator).map_err(|source| ScanError::Malformed {
                line: self.lineno,
                source,
            }),
        )
    }
}
