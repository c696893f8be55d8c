use crate::domain::{fixed, plain, CalculationResult, LogTable, TABLE_COLUMNS};
use std::fs;
use thiserror::Error;

pub const DEFAULT_CALCULATION_FILE: &str = "calculation.json";
pub const DEFAULT_TABLE_FILE: &str = "log_table.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("result {0} has no JSON representation")]
    NonFiniteResult(String),
}

/// Snapshot exports of the current calculation and the log table.
pub struct FileExporter;

impl FileExporter {
    /// Writes the calculation, steps included, as pretty JSON.
    ///
    /// Returns the filename written on success. A result that overflowed to
    /// infinity is refused, since JSON would store it as `null`.
    pub fn export_calculation(calculation: &CalculationResult, filename: &str) -> Result<String, ExportError> {
        if !calculation.result.is_finite() {
            return Err(ExportError::NonFiniteResult(plain(calculation.result)));
        }
        let json = serde_json::to_string_pretty(calculation)?;
        fs::write(filename, json)?;
        Ok(filename.to_string())
    }

    /// Writes the table as CSV: a `N,.0,...,.9` header, then one line per row
    /// with the row label followed by the four-decimal log values.
    pub fn export_table(table: &LogTable, filename: &str) -> Result<String, ExportError> {
        let mut writer = csv::Writer::from_path(filename)?;

        let mut header = vec!["N".to_string()];
        header.extend((0..TABLE_COLUMNS).map(LogTable::column_label));
        writer.write_record(&header)?;

        for (row, entries) in table.rows().iter().enumerate() {
            let mut record = vec![table.row_label(row)];
            record.extend(entries.iter().map(|entry| entry.display_value.clone()));
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(filename.to_string())
    }

    /// Plain-text rendering of a calculation for the clipboard and `--print`.
    pub fn calculation_summary(calculation: &CalculationResult) -> String {
        let mut lines = vec![format!(
            "{}_{}({}) = {}",
            calculation.operation,
            plain(calculation.base),
            plain(calculation.value),
            fixed(calculation.result, 6)
        )];
        for step in &calculation.steps {
            lines.push(format!("{}. {}  -- {}", step.index, step.formula, step.explanation));
        }
        lines.join("\n")
    }
}
