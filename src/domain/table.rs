//! The base-10 logarithm table shown in the "Visual Log Book" screen.

use super::format::fixed;
use super::models::{CalculationResult, ClosestMatch, LogTableEntry, Operation, TablePosition};

pub const TABLE_ROWS: usize = 10;
pub const TABLE_COLUMNS: usize = 10;
/// Decimal places of `LogTableEntry::display_value`.
pub const TABLE_PRECISION: usize = 4;

/// Fixed 10x10 grid of base-10 logarithms.
///
/// Row `i`, column `j` holds the number `1 + i + j/10`. The values are
/// mathematical constants, so a table can be cached for as long as needed.
#[derive(Debug, Clone, PartialEq)]
pub struct LogTable {
    rows: Vec<Vec<LogTableEntry>>,
}

impl LogTable {
    /// Builds the table. Deterministic and cheap.
    ///
    /// # Examples
    ///
    /// ```
    /// use logbook::domain::{LogTable, TablePosition};
    ///
    /// let table = LogTable::build();
    /// let entry = table.entry(TablePosition { row: 1, column: 0 }).unwrap();
    /// assert_eq!(entry.number, 2.0);
    /// assert_eq!(entry.display_value, "0.3010");
    /// ```
    pub fn build() -> Self {
        let rows = (0..TABLE_ROWS)
            .map(|i| {
                (0..TABLE_COLUMNS)
                    .map(|j| {
                        let raw = 1.0 + i as f64 + j as f64 / 10.0;
                        let number = (raw * 10.0).round() / 10.0;
                        let log_value = number.log10();
                        LogTableEntry {
                            number,
                            log_value,
                            display_value: fixed(log_value, TABLE_PRECISION),
                        }
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<LogTableEntry>] {
        &self.rows
    }

    pub fn entry(&self, position: TablePosition) -> Option<&LogTableEntry> {
        self.rows.get(position.row)?.get(position.column)
    }

    /// All entries in row-major order with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (TablePosition, &LogTableEntry)> {
        self.rows.iter().enumerate().flat_map(|(row, entries)| {
            entries
                .iter()
                .enumerate()
                .map(move |(column, entry)| (TablePosition { row, column }, entry))
        })
    }

    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Header for a row: the first number in it, to one decimal.
    pub fn row_label(&self, row: usize) -> String {
        self.rows
            .get(row)
            .and_then(|entries| entries.first())
            .map(|entry| fixed(entry.number, 1))
            .unwrap_or_default()
    }

    /// Header for a column: the second decimal digit, `.0` to `.9`.
    pub fn column_label(column: usize) -> String {
        format!(".{}", column)
    }

    /// Finds the entry whose number is nearest to `target`.
    ///
    /// Scans row-major with a strict comparison, so on a tie the entry seen
    /// first wins. A non-finite target has no nearest entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use logbook::domain::{LogTable, TablePosition};
    ///
    /// let table = LogTable::build();
    /// assert_eq!(table.find_closest(5.0), Some(TablePosition { row: 4, column: 0 }));
    /// assert_eq!(table.find_closest(f64::NAN), None);
    /// ```
    pub fn find_closest(&self, target: f64) -> ClosestMatch {
        if !target.is_finite() {
            return None;
        }

        let mut closest: ClosestMatch = None;
        let mut closest_diff = f64::INFINITY;
        for (position, entry) in self.iter() {
            let diff = (entry.number - target).abs();
            if diff < closest_diff {
                closest_diff = diff;
                closest = Some(position);
            }
        }
        closest
    }
}

/// Free-function form of [`LogTable::build`].
pub fn build_log_table() -> LogTable {
    LogTable::build()
}

/// Free-function form of [`LogTable::find_closest`].
pub fn find_closest(table: &LogTable, target: f64) -> ClosestMatch {
    table.find_closest(target)
}

/// Number to look up in the table for a finished calculation.
///
/// For a logarithm that is the operand; for an antilog it is the computed
/// result, since that is the number whose logarithm the table lists.
pub fn target_for(calculation: &CalculationResult) -> f64 {
    match calculation.operation {
        Operation::Log => calculation.value,
        Operation::Antilog => calculation.result,
    }
}
