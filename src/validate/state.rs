use crate::log::LogLine;
use std::collections::BTreeMap;

/// Ordered counter map. Absent keys read as 0 and reads never insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMap<K: Ord>(BTreeMap<K, u64>);

impl<K: Ord> Default for CountMap<K> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<K: Ord> CountMap<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> u64 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, key: K) {
        *self.0.entry(key).or_insert(0) += 1;
    }

    /// Store `value` if it exceeds the current value (0 when absent).
    pub fn raise_to(&mut self, key: K, value: u64) {
        let slot = self.0.entry(key).or_insert(0);
        if value > *slot {
            *slot = value;
        }
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.0.iter().map(|(k, v)| (k, *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.0.keys()
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Accumulators filled by one sequential scan of a log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationState {
    pub total_lines_per_operator: CountMap<String>,
    pub max_operator_count_per_operator: CountMap<String>,
    pub receipt_count_per_sequence_number: CountMap<u64>,
    pub total_line_count: u64,
    pub max_sequence_number: u64,
}

impl ValidationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, line: &LogLine) {
        self.total_lines_per_operator
            .increment(line.operator_name.clone());
        self.total_line_count += 1;
        self.max_operator_count_per_operator
            .raise_to(line.operator_name.clone(), line.operator_count);
        self.receipt_count_per_sequence_number
            .increment(line.sequence_number);
        self.max_sequence_number = self.max_sequence_number.max(line.sequence_number);
    }
}
