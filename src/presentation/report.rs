//! Plain-text report for the non-interactive `--print` mode.

use crate::domain::{calculate, plain, target_for, DomainResult, LogTable, Operation};
use crate::infrastructure::FileExporter;

/// Calculates and renders the result, the steps and the nearest table entry.
///
/// # Examples
///
/// ```
/// use logbook::domain::Operation;
/// use logbook::presentation::render_report;
///
/// let report = render_report(Operation::Antilog, 2.0, 3.0).unwrap();
/// assert!(report.starts_with("antilog_2(3) = 8.000000"));
/// ```
pub fn render_report(operation: Operation, base: f64, value: f64) -> DomainResult<String> {
    let calculation = calculate(operation, base, value)?;
    let mut report = FileExporter::calculation_summary(&calculation);

    let table = LogTable::build();
    if let Some(position) = table.find_closest(target_for(&calculation)) {
        if let Some(entry) = table.entry(position) {
            report.push_str(&format!(
                "\nClosest table value: {} (row {}, column {}) log_10 = {}",
                plain(entry.number),
                position.row,
                position.column,
                entry.display_value
            ));
        }
    }
    Ok(report)
}
