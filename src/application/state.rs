//! Application state management for the logarithm calculator.
//!
//! This module holds the form inputs, the last calculation outcome and which
//! screen is open. The calculation engine itself is stateless; everything
//! that lives across key presses lives here.

use crate::domain::{
    calculate, fixed, parse_number, plain, target_for, CalculationResult, ClosestMatch, DomainResult,
    LogTable, LogTableEntry, Operation,
};
use crate::infrastructure::{
    ClipboardError, ExportError, ResolvedConfig, DEFAULT_CALCULATION_FILE, DEFAULT_TABLE_FILE,
};
use tracing::{debug, info, warn};

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted and which popup, if
/// any, is drawn over the calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Calculator form - typing edits the focused field
    Normal,
    /// Step-by-step solution is displayed
    Steps,
    /// Visual log table with its walkthrough is displayed
    LogTable,
    /// Help screen is displayed
    Help,
    /// Filename prompt for the JSON export of the current calculation
    ExportCalculation,
    /// Filename prompt for the CSV export of the log table
    ExportTable,
}

/// Form field that currently receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Operation,
    Base,
    Value,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Operation => Field::Base,
            Field::Base => Field::Value,
            Field::Value => Field::Operation,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Field::Operation => Field::Value,
            Field::Base => Field::Operation,
            Field::Value => Field::Base,
        }
    }
}

/// Stages of the guided tour through the log table.
///
/// Only [`WalkthroughStage::Locating`] highlights a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkthroughStage {
    Understanding,
    Locating,
    Reading,
}

impl WalkthroughStage {
    pub const ALL: [WalkthroughStage; 3] = [
        WalkthroughStage::Understanding,
        WalkthroughStage::Locating,
        WalkthroughStage::Reading,
    ];

    /// Zero-based position of the stage.
    pub fn index(self) -> usize {
        match self {
            WalkthroughStage::Understanding => 0,
            WalkthroughStage::Locating => 1,
            WalkthroughStage::Reading => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WalkthroughStage::Understanding => "Understanding the Log Table",
            WalkthroughStage::Locating => "Locating Your Value",
            WalkthroughStage::Reading => "Reading the Result",
        }
    }

    /// Stage text for a given calculation.
    pub fn description(self, calculation: &CalculationResult) -> String {
        match self {
            WalkthroughStage::Understanding => {
                "This is a standard logarithm table showing log₁₀ values for numbers 1.0 to 10.9".to_string()
            }
            WalkthroughStage::Locating => {
                let target = match calculation.operation {
                    Operation::Log => plain(calculation.value),
                    Operation::Antilog => fixed(calculation.result, 3),
                };
                format!("We need to find {} in the table", target)
            }
            WalkthroughStage::Reading => {
                "The corresponding logarithm value helps us understand the calculation".to_string()
            }
        }
    }

    /// The following stage, or `self` on the last one.
    pub fn next(self) -> Self {
        match self {
            WalkthroughStage::Understanding => WalkthroughStage::Locating,
            WalkthroughStage::Locating | WalkthroughStage::Reading => WalkthroughStage::Reading,
        }
    }

    /// The preceding stage, or `self` on the first one.
    pub fn previous(self) -> Self {
        match self {
            WalkthroughStage::Understanding | WalkthroughStage::Locating => WalkthroughStage::Understanding,
            WalkthroughStage::Reading => WalkthroughStage::Locating,
        }
    }
}

/// Text shown in the result card when a calculation is rejected.
pub const INVALID_INPUT: &str = "Invalid input";

/// Main application state.
///
/// # Examples
///
/// ```
/// use logbook::application::{App, AppMode};
/// use logbook::domain::Operation;
///
/// let app = App::default();
/// assert_eq!(app.base_input, "10");
/// assert_eq!(app.operation, Operation::Log);
/// assert_eq!(app.mode, AppMode::Normal);
/// ```
#[derive(Debug)]
pub struct App {
    /// Selected operation
    pub operation: Operation,
    /// Base field text
    pub base_input: String,
    /// Value (or exponent) field text
    pub value_input: String,
    /// Field receiving key presses in normal mode
    pub focus: Field,
    /// Cursor position within the focused text field or filename prompt
    pub cursor_position: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Outcome of the last calculation, if one was attempted
    pub outcome: Option<DomainResult<CalculationResult>>,
    /// Base-10 log table, built once per session
    pub log_table: LogTable,
    /// Current stage of the log table walkthrough
    pub walkthrough: WalkthroughStage,
    /// Cell highlighted in the log table view
    pub highlighted: ClosestMatch,
    /// Scroll offset of the steps popup
    pub steps_scroll: usize,
    /// Scroll offset of the table grid
    pub table_scroll: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Input buffer for filename entry
    pub filename_input: String,
}

impl Default for App {
    fn default() -> Self {
        Self::from_config(&ResolvedConfig::default())
    }
}

impl App {
    /// Creates the application with the form pre-filled from `config`.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            operation: config.operation,
            base_input: config.base.clone(),
            value_input: config.value.clone(),
            focus: Field::Value,
            cursor_position: config.value.len(),
            mode: AppMode::Normal,
            outcome: None,
            log_table: LogTable::build(),
            walkthrough: WalkthroughStage::Understanding,
            highlighted: None,
            steps_scroll: 0,
            table_scroll: 0,
            help_scroll: 0,
            status_message: None,
            filename_input: String::new(),
        }
    }

    /// Whether the Calculate action is enabled: both text fields are non-empty.
    pub fn can_calculate(&self) -> bool {
        !self.base_input.trim().is_empty() && !self.value_input.trim().is_empty()
    }

    /// Runs the calculation for the current form contents.
    ///
    /// Unparsable text is treated as NaN, so it is rejected exactly like an
    /// out-of-range number, base first.
    /// Does nothing while [`App::can_calculate`] is false.
    pub fn calculate(&mut self) {
        if !self.can_calculate() {
            return;
        }

        let base = parse_number(&self.base_input).unwrap_or(f64::NAN);
        let value = parse_number(&self.value_input).unwrap_or(f64::NAN);
        let outcome = calculate(self.operation, base, value);

        match &outcome {
            Ok(calculation) => info!(
                operation = %calculation.operation,
                base = calculation.base,
                value = calculation.value,
                result = calculation.result,
                "calculation finished"
            ),
            Err(error) => debug!(%error, base = %self.base_input, value = %self.value_input, "calculation rejected"),
        }

        self.outcome = Some(outcome);
        self.status_message = None;
    }

    /// The last successful calculation, if any.
    pub fn calculation(&self) -> Option<&CalculationResult> {
        self.outcome.as_ref().and_then(|outcome| outcome.as_ref().ok())
    }

    /// Result card text: six decimals, or [`INVALID_INPUT`] on failure.
    pub fn result_text(&self) -> Option<String> {
        self.outcome.as_ref().map(|outcome| match outcome {
            Ok(calculation) => fixed(calculation.result, 6),
            Err(_) => INVALID_INPUT.to_string(),
        })
    }

    /// Moves focus to the next form field.
    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    /// Moves focus to the previous form field.
    pub fn focus_previous(&mut self) {
        self.set_focus(self.focus.previous());
    }

    fn set_focus(&mut self, field: Field) {
        self.focus = field;
        self.cursor_position = self.focused_input().map(String::len).unwrap_or(0);
    }

    /// Switches between logarithm and antilogarithm.
    pub fn toggle_operation(&mut self) {
        self.operation = self.operation.toggled();
    }

    /// Text of the focused field, or `None` when the operation selector is focused.
    pub fn focused_input(&self) -> Option<&String> {
        match self.focus {
            Field::Operation => None,
            Field::Base => Some(&self.base_input),
            Field::Value => Some(&self.value_input),
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Operation => None,
            Field::Base => Some(&mut self.base_input),
            Field::Value => Some(&mut self.value_input),
        }
    }

    /// Inserts a character into the focused field.
    ///
    /// Only characters that can appear in a decimal number are accepted.
    pub fn insert_char(&mut self, c: char) {
        if !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')) {
            return;
        }
        let position = self.cursor_position;
        if let Some(input) = self.focused_input_mut() {
            input.insert(position, c);
            self.cursor_position += 1;
        }
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        let position = self.cursor_position;
        if position == 0 {
            return;
        }
        if let Some(input) = self.focused_input_mut() {
            input.remove(position - 1);
            self.cursor_position -= 1;
        }
    }

    /// Deletes the character under the cursor.
    pub fn delete(&mut self) {
        let position = self.cursor_position;
        if let Some(input) = self.focused_input_mut() {
            if position < input.len() {
                input.remove(position);
            }
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let len = self.focused_input().map(String::len).unwrap_or(0);
        if self.cursor_position < len {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.focused_input().map(String::len).unwrap_or(0);
    }

    /// Opens the step-by-step solution. Requires a successful calculation.
    pub fn open_steps(&mut self) {
        if self.calculation().is_some() {
            self.mode = AppMode::Steps;
            self.steps_scroll = 0;
        }
    }

    /// Opens the log table view at the first walkthrough stage.
    /// Requires a successful calculation.
    pub fn open_log_table(&mut self) {
        if self.calculation().is_some() {
            self.mode = AppMode::LogTable;
            self.table_scroll = 0;
            self.set_walkthrough(WalkthroughStage::Understanding);
        }
    }

    /// Closes whichever popup is open.
    pub fn close_popup(&mut self) {
        self.mode = AppMode::Normal;
        self.highlighted = None;
    }

    pub fn next_stage(&mut self) {
        self.set_walkthrough(self.walkthrough.next());
    }

    pub fn previous_stage(&mut self) {
        self.set_walkthrough(self.walkthrough.previous());
    }

    /// Changes stage and recomputes the highlighted cell.
    fn set_walkthrough(&mut self, stage: WalkthroughStage) {
        self.walkthrough = stage;
        self.highlighted = match (stage, self.calculation()) {
            (WalkthroughStage::Locating, Some(calculation)) => {
                self.log_table.find_closest(target_for(calculation))
            }
            _ => None,
        };
    }

    /// Entry of the highlighted cell, if one is highlighted.
    pub fn highlighted_entry(&self) -> Option<&LogTableEntry> {
        self.highlighted.and_then(|position| self.log_table.entry(position))
    }

    pub fn scroll_up(&mut self) {
        let scroll = match self.mode {
            AppMode::Steps => &mut self.steps_scroll,
            AppMode::LogTable => &mut self.table_scroll,
            AppMode::Help => &mut self.help_scroll,
            _ => return,
        };
        *scroll = scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        match self.mode {
            AppMode::Steps => self.steps_scroll += 1,
            AppMode::LogTable => self.table_scroll += 1,
            AppMode::Help => self.help_scroll += 1,
            _ => {}
        }
    }

    /// Switches to the JSON export prompt. Requires a successful calculation.
    pub fn start_export_calculation(&mut self) {
        if self.calculation().is_none() {
            self.status_message = Some("Nothing to export yet - calculate first".to_string());
            return;
        }
        self.start_filename_prompt(AppMode::ExportCalculation, DEFAULT_CALCULATION_FILE);
    }

    /// Switches to the CSV export prompt for the log table.
    pub fn start_export_table(&mut self) {
        self.start_filename_prompt(AppMode::ExportTable, DEFAULT_TABLE_FILE);
    }

    fn start_filename_prompt(&mut self, mode: AppMode, default: &str) {
        self.mode = mode;
        self.filename_input = default.to_string();
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Filename from the prompt, falling back to the default for the mode.
    pub fn get_export_filename(&self) -> String {
        if !self.filename_input.is_empty() {
            return self.filename_input.clone();
        }
        match self.mode {
            AppMode::ExportTable => DEFAULT_TABLE_FILE.to_string(),
            _ => DEFAULT_CALCULATION_FILE.to_string(),
        }
    }

    /// Cancels filename input and returns to normal mode.
    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.set_focus(self.focus);
    }

    /// Processes the result of an export and returns to normal mode.
    pub fn set_export_result(&mut self, result: Result<String, ExportError>) {
        match result {
            Ok(filename) => {
                info!(%filename, "export written");
                self.status_message = Some(format!("Exported to {}", filename));
            }
            Err(error) => {
                warn!(%error, "export failed");
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }

        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.set_focus(self.focus);
    }

    /// Processes the result of a clipboard copy.
    pub fn set_copy_result(&mut self, result: Result<(), ClipboardError>) {
        self.status_message = Some(match result {
            Ok(()) => "Result copied to clipboard".to_string(),
            Err(error) => {
                warn!(%error, "clipboard copy failed");
                error.to_string()
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TablePosition, ValidationError};

    fn app_with(operation: Operation, base: &str, value: &str) -> App {
        let mut app = App::default();
        app.operation = operation;
        app.base_input = base.to_string();
        app.value_input = value.to_string();
        app
    }

    #[test]
    fn test_app_default() {
        let app = App::default();
        assert_eq!(app.operation, Operation::Log);
        assert_eq!(app.base_input, "10");
        assert!(app.value_input.is_empty());
        assert_eq!(app.focus, Field::Value);
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.outcome.is_none());
        assert!(app.result_text().is_none());
        assert_eq!(app.log_table.len(), 100);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_from_config_prefills_form() {
        let config = ResolvedConfig {
            base: "2".to_string(),
            operation: Operation::Antilog,
            value: "3".to_string(),
            ..ResolvedConfig::default()
        };
        let app = App::from_config(&config);
        assert_eq!(app.base_input, "2");
        assert_eq!(app.value_input, "3");
        assert_eq!(app.operation, Operation::Antilog);
        assert_eq!(app.cursor_position, 1);
    }

    #[test]
    fn test_calculate_disabled_with_empty_field() {
        let mut app = app_with(Operation::Log, "10", "");
        assert!(!app.can_calculate());
        app.calculate();
        assert!(app.outcome.is_none());

        let mut app = app_with(Operation::Log, " ", "5");
        assert!(!app.can_calculate());
        app.calculate();
        assert!(app.outcome.is_none());
    }

    #[test]
    fn test_calculate_log() {
        let mut app = app_with(Operation::Log, "10", "100");
        app.calculate();
        assert_eq!(app.result_text().as_deref(), Some("2.000000"));
        assert_eq!(app.calculation().unwrap().steps.len(), 5);
    }

    #[test]
    fn test_result_text_rounds_exact_ties_up() {
        let mut app = app_with(Operation::Log, "340282366920938463463374607431768211456", "2");
        app.calculate();
        assert_eq!(app.result_text().as_deref(), Some("0.007813"));
    }

    #[test]
    fn test_overflowing_antilog_shows_infinity() {
        let mut app = app_with(Operation::Antilog, "10", "400");
        app.calculate();
        assert_eq!(app.result_text().as_deref(), Some("Infinity"));
    }

    #[test]
    fn test_calculate_invalid_shows_invalid_input() {
        let mut app = app_with(Operation::Log, "1", "100");
        app.calculate();
        assert_eq!(app.outcome, Some(Err(ValidationError::InvalidBase)));
        assert_eq!(app.result_text().as_deref(), Some(INVALID_INPUT));
        assert!(app.calculation().is_none());
    }

    #[test]
    fn test_unparsable_fields_map_to_validation_errors() {
        let mut app = app_with(Operation::Log, "ten", "100");
        app.calculate();
        assert_eq!(app.outcome, Some(Err(ValidationError::InvalidBase)));

        let mut app = app_with(Operation::Log, "10", "1e");
        app.calculate();
        assert_eq!(app.outcome, Some(Err(ValidationError::InvalidValue)));

        let mut app = app_with(Operation::Log, "1", "--");
        app.calculate();
        assert_eq!(app.outcome, Some(Err(ValidationError::InvalidBase)));
    }

    #[test]
    fn test_popups_require_successful_calculation() {
        let mut app = App::default();
        app.open_steps();
        assert_eq!(app.mode, AppMode::Normal);
        app.open_log_table();
        assert_eq!(app.mode, AppMode::Normal);

        let mut app = app_with(Operation::Log, "0", "5");
        app.calculate();
        app.open_steps();
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_walkthrough_highlights_only_when_locating() {
        let mut app = app_with(Operation::Antilog, "2", "3");
        app.calculate();
        app.open_log_table();
        assert_eq!(app.mode, AppMode::LogTable);
        assert_eq!(app.walkthrough, WalkthroughStage::Understanding);
        assert!(app.highlighted.is_none());

        app.next_stage();
        assert_eq!(app.walkthrough, WalkthroughStage::Locating);
        assert_eq!(app.highlighted, Some(TablePosition { row: 7, column: 0 }));
        assert_eq!(app.highlighted_entry().unwrap().number, 8.0);

        app.next_stage();
        assert_eq!(app.walkthrough, WalkthroughStage::Reading);
        assert!(app.highlighted.is_none());

        app.next_stage();
        assert_eq!(app.walkthrough, WalkthroughStage::Reading);

        app.previous_stage();
        assert_eq!(app.highlighted, Some(TablePosition { row: 7, column: 0 }));
        app.previous_stage();
        app.previous_stage();
        assert_eq!(app.walkthrough, WalkthroughStage::Understanding);
        assert!(app.highlighted.is_none());
    }

    #[test]
    fn test_reopening_table_resets_walkthrough() {
        let mut app = app_with(Operation::Log, "10", "5");
        app.calculate();
        app.open_log_table();
        app.next_stage();
        assert_eq!(app.highlighted, Some(TablePosition { row: 4, column: 0 }));
        app.close_popup();
        assert!(app.highlighted.is_none());

        app.open_log_table();
        assert_eq!(app.walkthrough, WalkthroughStage::Understanding);
        assert!(app.highlighted.is_none());
    }

    #[test]
    fn test_stage_descriptions() {
        let log = crate::domain::calculate(Operation::Log, 10.0, 2.5).unwrap();
        assert_eq!(WalkthroughStage::Locating.description(&log), "We need to find 2.5 in the table");

        let antilog = crate::domain::calculate(Operation::Antilog, 2.0, 0.5).unwrap();
        assert_eq!(WalkthroughStage::Locating.description(&antilog), "We need to find 1.414 in the table");
        assert_eq!(WalkthroughStage::Reading.index(), 2);
        assert_eq!(WalkthroughStage::ALL.len(), 3);
    }

    #[test]
    fn test_field_editing() {
        let mut app = App::default();
        app.insert_char('4');
        app.insert_char('x');
        app.insert_char('2');
        assert_eq!(app.value_input, "42");
        assert_eq!(app.cursor_position, 2);

        app.move_cursor_left();
        app.backspace();
        assert_eq!(app.value_input, "2");
        app.move_cursor_home();
        app.delete();
        assert!(app.value_input.is_empty());
        app.backspace();
        assert!(app.value_input.is_empty());
    }

    #[test]
    fn test_focus_cycles_and_moves_cursor_to_end() {
        let mut app = App::default();
        app.focus_next();
        assert_eq!(app.focus, Field::Operation);
        app.insert_char('5');
        assert!(app.value_input.is_empty());
        assert_eq!(app.base_input, "10");

        app.focus_next();
        assert_eq!(app.focus, Field::Base);
        assert_eq!(app.cursor_position, 2);
        app.focus_previous();
        app.focus_previous();
        assert_eq!(app.focus, Field::Value);
    }

    #[test]
    fn test_export_prompts() {
        let mut app = App::default();
        app.start_export_calculation();
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.status_message.is_some());

        app.start_export_table();
        assert_eq!(app.mode, AppMode::ExportTable);
        assert_eq!(app.filename_input, DEFAULT_TABLE_FILE);
        app.filename_input.clear();
        assert_eq!(app.get_export_filename(), DEFAULT_TABLE_FILE);
        app.cancel_filename_input();
        assert_eq!(app.mode, AppMode::Normal);

        let mut app = app_with(Operation::Log, "10", "100");
        app.calculate();
        app.start_export_calculation();
        assert_eq!(app.mode, AppMode::ExportCalculation);
        assert_eq!(app.get_export_filename(), DEFAULT_CALCULATION_FILE);
    }

    #[test]
    fn test_set_export_result() {
        let mut app = App::default();
        app.start_export_table();
        app.set_export_result(Ok("t.csv".to_string()));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.status_message.as_deref(), Some("Exported to t.csv"));

        app.start_export_table();
        let error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        app.set_export_result(Err(ExportError::Io(error)));
        assert_eq!(app.status_message.as_deref(), Some("Export failed: denied"));
        assert!(app.filename_input.is_empty());
    }

    #[test]
    fn test_scrolling_depends_on_mode() {
        let mut app = app_with(Operation::Log, "10", "100");
        app.calculate();
        app.scroll_down();
        assert_eq!(app.steps_scroll, 0);

        app.open_steps();
        app.scroll_down();
        app.scroll_down();
        app.scroll_up();
        assert_eq!(app.steps_scroll, 1);
        assert_eq!(app.table_scroll, 0);
    }
}
