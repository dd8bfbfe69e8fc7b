//! Post-scan consistency checks.
//!
//! Every check reads the finished [`ValidationState`] and reports on its own;
//! none of them short-circuits another.

use crate::report::{Discrepancy, ValidationReport};
use crate::validate::state::ValidationState;

/// Operators whose highest reported running count differs from the number
/// of lines attributed to them, in ascending name order.
pub fn operator_counts(state: &ValidationState) -> Vec<Discrepancy> {
    state
        .max_operator_count_per_operator
        .iter()
        .filter_map(|(name, max_reported)| {
            let lines_seen = state.total_lines_per_operator.get(name);
            (max_reported != lines_seen).then(|| Discrepancy::OperatorCount {
                operator: name.clone(),
                max_reported,
                lines_seen,
            })
        })
        .collect()
}

/// Number of parallel sources, taken from the receipts of sequence number 1.
///
/// Assumes sequence number 1 reached every source exactly once. 0 when it
/// never appeared.
pub fn parallelism(state: &ValidationState) -> u64 {
    state.receipt_count_per_sequence_number.get(&1)
}

/// Sequence numbers not received exactly `expected` times, ascending.
pub fn sequence_receipts(state: &ValidationState, expected: u64) -> Vec<Discrepancy> {
    state
        .receipt_count_per_sequence_number
        .iter()
        .filter(|(_, received)| *received != expected)
        .map(|(seq, received)| Discrepancy::SequenceReceipts {
            sequence_number: *seq,
            received,
            expected,
        })
        .collect()
}

/// Sequence numbers are taken to start at 0, so `max + 1` distinct numbers
/// each received `parallelism` times.
pub fn total_vs_range(state: &ValidationState, parallelism: u64) -> Option<Discrepancy> {
    let expected_total = (u128::from(state.max_sequence_number) + 1) * u128::from(parallelism);
    (u128::from(state.total_line_count) != expected_total).then(|| Discrepancy::TotalVsRange {
        total_lines: state.total_line_count,
        expected_total,
        max_sequence_number: state.max_sequence_number,
        parallelism,
    })
}

pub fn total_vs_operators(state: &ValidationState) -> Option<Discrepancy> {
    let per_operator_sum = state.total_lines_per_operator.total();
    (state.total_line_count != per_operator_sum).then(|| Discrepancy::TotalVsOperators {
        total_lines: state.total_line_count,
        per_operator_sum,
        operators: state.total_lines_per_operator.keys().cloned().collect(),
    })
}

/// Run every check and assemble the report.
pub fn run_all(state: &ValidationState) -> ValidationReport {
    let parallelism = parallelism(state);

    let mut discrepancies = operator_counts(state);
    discrepancies.extend(sequence_receipts(state, parallelism));
    discrepancies.extend(total_vs_range(state, parallelism));
    discrepancies.extend(total_vs_operators(state));

    for d in &discrepancies {
        tracing::debug!(discrepancy = %d, "check failed");
    }

    ValidationReport {
        discrepancies,
        parallelism,
        total_lines: state.total_line_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogLine;
    use pretty_assertions::assert_eq;

    fn line(seq: u64, op: &str, count: u64) -> LogLine {
        LogLine {
            timestamp: "1496912013512".to_string(),
            sequence_number: seq,
            operator_name: op.to_string(),
            operator_count: count,
        }
    }

    /// `sources` sources each emitting `0..numbers` once, each source
    /// acting as its own operator with an honest running count.
    fn synthetic(sources: u64, numbers: u64) -> Vec<LogLine> {
        let mut out = Vec::new();
        for seq in 0..numbers {
            for src in 0..sources {
                out.push(line(seq, &format!("Source {}", src), seq + 1));
            }
        }
        out
    }

    fn state_of(lines: &[LogLine]) -> ValidationState {
        let mut state = ValidationState::new();
        for l in lines {
            state.record(l);
        }
        state
    }

    #[test]
    fn consistent_log_has_no_discrepancies() {
        let report = run_all(&state_of(&synthetic(4, 25)));
        assert_eq!(report.discrepancies, vec![]);
        assert_eq!(report.parallelism, 4);
        assert_eq!(report.total_lines, 100);
    }

    #[test]
    fn flags_only_the_miscounting_operator() {
        let mut lines = synthetic(3, 10);
        let last = lines
            .iter_mut()
            .rev()
            .find(|l| l.operator_name == "Source 1")
            .unwrap();
        last.operator_count = 42;

        let report = run_all(&state_of(&lines));
        assert_eq!(
            report.discrepancies,
            vec![Discrepancy::OperatorCount {
                operator: "Source 1".to_string(),
                max_reported: 42,
                lines_seen: 10,
            }]
        );
    }

    #[test]
    fn flags_sequence_number_missed_by_one_source() {
        let mut lines = synthetic(3, 10);
        // Source 2 never emits 6; its later counts stay honest.
        lines.retain(|l| !(l.sequence_number == 6 && l.operator_name == "Source 2"));
        for l in lines.iter_mut() {
            if l.operator_name == "Source 2" && l.sequence_number > 6 {
                l.operator_count -= 1;
            }
        }

        let state = state_of(&lines);
        assert_eq!(
            sequence_receipts(&state, parallelism(&state)),
            vec![Discrepancy::SequenceReceipts {
                sequence_number: 6,
                received: 2,
                expected: 3,
            }]
        );
        assert_eq!(operator_counts(&state), vec![]);
        assert_eq!(
            total_vs_range(&state, 3),
            Some(Discrepancy::TotalVsRange {
                total_lines: 29,
                expected_total: 30,
                max_sequence_number: 9,
                parallelism: 3,
            })
        );
    }

    #[test]
    fn sequence_findings_ascend_regardless_of_input_order() {
        let lines = vec![
            line(9, "a", 1),
            line(1, "a", 2),
            line(1, "a", 3),
            line(4, "a", 4),
            line(0, "a", 5),
            line(0, "a", 6),
            line(2, "a", 7),
        ];
        let state = state_of(&lines);
        let flagged: Vec<u64> = sequence_receipts(&state, parallelism(&state))
            .into_iter()
            .map(|d| match d {
                Discrepancy::SequenceReceipts {
                    sequence_number, ..
                } => sequence_number,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(flagged, vec![2, 4, 9]);
    }

    #[test]
    fn missing_sequence_one_gives_zero_parallelism() {
        let state = state_of(&[line(0, "a", 1), line(2, "a", 2)]);
        assert_eq!(parallelism(&state), 0);

        let report = run_all(&state);
        assert_eq!(
            report.discrepancies,
            vec![
                Discrepancy::SequenceReceipts {
                    sequence_number: 0,
                    received: 1,
                    expected: 0,
                },
                Discrepancy::SequenceReceipts {
                    sequence_number: 2,
                    received: 1,
                    expected: 0,
                },
                Discrepancy::TotalVsRange {
                    total_lines: 2,
                    expected_total: 0,
                    max_sequence_number: 2,
                    parallelism: 0,
                },
            ]
        );
    }

    #[test]
    fn empty_log_is_consistent() {
        let report = run_all(&ValidationState::new());
        assert!(report.is_consistent());
        assert_eq!(report.total_lines, 0);
    }

    #[test]
    fn total_vs_operators_lists_operator_names() {
        let mut state = state_of(&[line(0, "b", 1), line(1, "a", 1)]);
        assert_eq!(total_vs_operators(&state), None);

        state.total_line_count += 1;
        assert_eq!(
            total_vs_operators(&state),
            Some(Discrepancy::TotalVsOperators {
                total_lines: 3,
                per_operator_sum: 2,
                operators: vec!["a".to_string(), "b".to_string()],
            })
        );
    }

    #[test]
    fn range_check_does_not_overflow() {
        let state = state_of(&[line(u64::MAX, "a", 1), line(1, "a", 2)]);
        let d = total_vs_range(&state, 1).unwrap();
        assert_eq!(
            d,
            Discrepancy::TotalVsRange {
                total_lines: 2,
                expected_total: u128::from(u64::MAX) + 1,
                max_sequence_number: u64::MAX,
                parallelism: 1,
            }
        );
    }
}
