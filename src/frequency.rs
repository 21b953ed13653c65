use std::collections::HashMap;
use log::trace;
use crate::csv_handler::TransactionTable;

/// Number of clients shown in the client ranking chart.
pub const TOP_CLIENTS: usize = 10;

/// Ordered `(label, count)` pairs.
///
/// The order is whatever the producing function documents; `ValueCounts` itself
/// never reorders entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueCounts {
    entries: Vec<(String, usize)>,
}

impl ValueCounts {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn max_count(&self) -> Option<usize> {
        self.entries.iter().map(|(_, count)| *count).max()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.entries.iter().map(|(label, count)| (label.as_str(), *count))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    /// Keeps the first `n` entries.
    pub fn head(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }

    pub fn reversed(mut self) -> Self {
        self.entries.reverse();
        self
    }
}

/// Counts occurrences of each label, highest count first.
///
/// Ties keep the order in which the labels were first seen. Empty labels are
/// missing values and are not counted.
pub fn value_counts<'a>(labels: impl IntoIterator<Item = &'a str>) -> ValueCounts {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<(String, usize)> = Vec::new();

    for label in labels {
        if label.is_empty() {
            trace!("Skipping empty label");
            continue;
        }
        match positions.get(label) {
            Some(&position) => entries[position].1 += 1,
            None => {
                positions.insert(label, entries.len());
                entries.push((label.to_owned(), 1));
            }
        }
    }

    // Stable sort, so equal counts stay in first-seen order.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    ValueCounts { entries }
}

/// Transaction counts per `tipo_transaccion`, highest count first.
pub fn count_by_type(table: &TransactionTable) -> ValueCounts {
    value_counts(table.records().iter().map(|record| record.tipo_transaccion.as_str()))
}

/// The `n` clients with the most transactions, in render order.
///
/// The result is ascending: the lowest count of the top `n` comes first and the
/// highest comes last. A horizontal bar chart draws entries bottom to top, so
/// the busiest client ends up at the top. Reverse it to get the ranking order.
pub fn top_clients(table: &TransactionTable, n: usize) -> ValueCounts {
    value_counts(table.records().iter().map(|record| record.cliente_id.as_str()))
        .head(n)
        .reversed()
}
