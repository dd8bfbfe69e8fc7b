//! Validation results and their plain-text rendering.

use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

/// One inconsistency found by the post-scan checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Discrepancy {
    /// Highest running count an operator reported differs from its line count.
    OperatorCount {
        operator: String,
        max_reported: u64,
        lines_seen: u64,
    },

    /// A sequence number was not received once per parallel source.
    SequenceReceipts {
        sequence_number: u64,
        received: u64,
        expected: u64,
    },

    /// Line total differs from `(max_sequence_number + 1) * parallelism`.
    TotalVsRange {
        total_lines: u64,
        expected_total: u128,
        max_sequence_number: u64,
        parallelism: u64,
    },

    /// Line total differs from the sum of per-operator line counts.
    TotalVsOperators {
        total_lines: u64,
        per_operator_sum: u64,
        operators: Vec<String>,
    },
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discrepancy::OperatorCount {
                operator,
                max_reported,
                lines_seen,
            } => write!(
                f,
                "operator '{}' count does not match: max reported {}, lines seen {}",
                operator, max_reported, lines_seen
            ),
            Discrepancy::SequenceReceipts {
                sequence_number,
                received,
                expected,
            } => write!(
                f,
                "sequence number {} has not been received by all sources: received {}, sources {}",
                sequence_number, received, expected
            ),
            Discrepancy::TotalVsRange {
                total_lines,
                expected_total,
                max_sequence_number,
                parallelism,
            } => write!(
                f,
                "number of lines does not match counted elements: total lines {}, expected {} ((max sequence number {} + 1) * {} sources)",
                total_lines, expected_total, max_sequence_number, parallelism
            ),
            Discrepancy::TotalVsOperators {
                total_lines,
                per_operator_sum,
                operators,
            } => write!(
                f,
                "number of lines does not match counted elements per operator: total lines {}, per-operator sum {}, saw operators [{}]",
                total_lines,
                per_operator_sum,
                operators.join(", ")
            ),
        }
    }
}

/// Outcome of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// In check order; sequence-number findings ascend by sequence number.
    pub discrepancies: Vec<Discrepancy>,
    /// Receipt count of sequence number 1, taken as the number of sources.
    pub parallelism: u64,
    pub total_lines: u64,
}

impl ValidationReport {
    pub fn is_consistent(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// One line per discrepancy, then the `Saw <n> lines` summary.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        for d in &self.discrepancies {
            writeln!(out, "{}", d)?;
        }
        writeln!(out, "Saw {} lines", self.total_lines)
    }
}
