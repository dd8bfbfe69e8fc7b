use serde::Serialize;

/// One record of the benchmark output log.
///
/// Layout on disk: `timestamp<sep>sequence_number<sep>operator_name<sep>operator_count`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogLine {
    /// Kept verbatim; no check looks at it.
    pub timestamp: String,
    pub sequence_number: u64,
    /// Trimmed of surrounding whitespace.
    pub operator_name: String,
    /// Running count reported by the operator as of this line.
    pub operator_count: u64,
}
