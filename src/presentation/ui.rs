use crate::application::{App, AppMode, Field, WalkthroughStage};
use crate::domain::{fixed, plain, CalculationResult, LogTable, Operation, TablePosition};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_operation(f, app, chunks[1]);
    render_inputs(f, app, chunks[2]);
    render_calculate_button(f, app, chunks[3]);
    render_result(f, app, chunks[4]);
    render_status_bar(f, app, chunks[6]);

    match app.mode {
        AppMode::Steps => {
            if let Some(calculation) = app.calculation() {
                render_steps_popup(f, calculation, app.steps_scroll);
            }
        }
        AppMode::LogTable => {
            if let Some(calculation) = app.calculation() {
                render_log_table_popup(f, app, calculation);
            }
        }
        AppMode::Help => render_help_popup(f, app.help_scroll),
        _ => {}
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("logbook - Logarithm Calculator with Step-by-Step Solutions")
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn field_block(title: String, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default()
    };
    Block::default().borders(Borders::ALL).title(title).border_style(style)
}

fn render_operation(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.mode == AppMode::Normal && app.focus == Field::Operation;
    let text = format!("◀ {} ▶", app.operation.label());
    let widget = Paragraph::new(text).block(field_block("Operation Type".to_string(), focused));
    f.render_widget(widget, area);
}

fn render_inputs(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let fields = [
        (Field::Base, "Base (default: 10)".to_string(), &app.base_input, columns[0]),
        (Field::Value, app.operation.value_label().to_string(), &app.value_input, columns[1]),
    ];

    for (field, title, text, rect) in fields {
        let focused = app.mode == AppMode::Normal && app.focus == field;
        let widget = Paragraph::new(text.as_str()).block(field_block(title, focused));
        f.render_widget(widget, rect);

        if focused {
            let offset = u16::try_from(app.cursor_position).unwrap_or(u16::MAX);
            let x = rect.x.saturating_add(1).saturating_add(offset);
            f.set_cursor_position((x.min(rect.right().saturating_sub(2)), rect.y + 1));
        }
    }
}

fn render_calculate_button(f: &mut Frame, app: &App, area: Rect) {
    let style = if app.can_calculate() {
        Style::default().fg(Color::Black).bg(Color::Magenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let button = Paragraph::new(Line::from(vec![
        Span::styled(" Calculate ", style),
        Span::raw("  Enter"),
    ]));
    f.render_widget(button, area);
}

fn render_result(f: &mut Frame, app: &App, area: Rect) {
    let Some(text) = app.result_text() else {
        return;
    };

    let (style, hint) = if app.calculation().is_some() {
        (Style::default().fg(Color::Green).add_modifier(Modifier::BOLD), " s: View Steps | t: Visual Log Book ")
    } else {
        (Style::default().fg(Color::Red), "")
    };
    let widget = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Result").title_bottom(hint));
    f.render_widget(widget, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => match app.status_message {
            Some(ref status) => status.clone(),
            None => "Tab/↑↓: field | ←→/Space: operation | Enter: calculate | Ctrl+S: save JSON | Ctrl+E: export table | Ctrl+Y: copy | F1/?: help | Esc/q: quit".to_string(),
        },
        AppMode::Steps => "↑↓/jk: scroll | Esc/q: close".to_string(),
        AppMode::LogTable => "←→/hl: walkthrough step | ↑↓/jk: scroll | Esc/q: close".to_string(),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::ExportCalculation => format!("Save calculation as: {} (Enter to save, Esc to cancel)", app.filename_input),
        AppMode::ExportTable => format!("Export table as: {} (Enter to export, Esc to cancel)", app.filename_input),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Steps | AppMode::LogTable => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::ExportCalculation | AppMode::ExportTable => Style::default().fg(Color::Yellow),
        });
    f.render_widget(input, area);
}

/// Centered rectangle covering `percent` of the screen in each direction.
fn popup_area(area: Rect, percent: u16) -> Rect {
    let margin_x = area.width * (100 - percent) / 200;
    let margin_y = area.height * (100 - percent) / 200;
    Rect {
        x: area.x + margin_x,
        y: area.y + margin_y,
        width: area.width - 2 * margin_x,
        height: area.height - 2 * margin_y,
    }
}

/// `log_b(v) = r` or `antilog_b(v) = r`, with the result to `places` decimals.
pub fn calculation_title(calculation: &CalculationResult, places: usize) -> String {
    format!(
        "{}_{}({}) = {}",
        calculation.operation,
        plain(calculation.base),
        plain(calculation.value),
        fixed(calculation.result, places)
    )
}

/// Lines of the step-by-step popup body.
pub fn step_lines(calculation: &CalculationResult) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, step) in calculation.steps.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", step.index),
                Style::default().fg(Color::White).bg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(step.formula.clone(), Style::default().fg(Color::Yellow)),
        ]));
        lines.push(Line::from(format!("    {}", step.explanation)));
        if i + 1 < calculation.steps.len() {
            lines.push(Line::from("    ↓").style(Style::default().fg(Color::DarkGray)));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Final Answer: ", Style::default().fg(Color::Green)),
        Span::styled(
            fixed(calculation.result, 6),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    ]));
    lines
}

fn render_steps_popup(f: &mut Frame, calculation: &CalculationResult, scroll: usize) {
    let popup_area = popup_area(f.area(), 80);
    f.render_widget(Clear, popup_area);

    let lines = step_lines(calculation);
    let visible_height = popup_area.height.saturating_sub(2) as usize;
    let start_line = scroll.min(lines.len().saturating_sub(visible_height));

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Step-by-Step Solution: {}", calculation_title(calculation, 6)))
                .style(Style::default().fg(Color::Green)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false })
        .scroll((start_line as u16, 0));
    f.render_widget(widget, popup_area);
}

/// "Your Calculation" text, four decimals as in the table view.
pub fn your_calculation_text(calculation: &CalculationResult) -> String {
    let (b, v, r) = (plain(calculation.base), plain(calculation.value), fixed(calculation.result, 4));
    match calculation.operation {
        Operation::Log => format!("log_{}({}) = {}", b, v, r),
        Operation::Antilog => format!("{}^{} = {}", b, v, r),
    }
}

fn render_log_table_popup(f: &mut Frame, app: &App, calculation: &CalculationResult) {
    let popup_area = popup_area(f.area(), 90);
    f.render_widget(Clear, popup_area);

    let outer = Block::default()
        .borders(Borders::ALL)
        .title("Visual Log Table")
        .style(Style::default().fg(Color::Blue));
    let inner = outer.inner(popup_area);
    f.render_widget(outer, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(4), Constraint::Length(4)])
        .split(inner);

    let stage = app.walkthrough;
    let walkthrough = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(
                "Step {} of {}: {}",
                stage.index() + 1,
                WalkthroughStage::ALL.len(),
                stage.title()
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(stage.description(calculation)),
    ])
    .block(Block::default().borders(Borders::ALL))
    .style(Style::default().fg(Color::White))
    .wrap(Wrap { trim: true });
    f.render_widget(walkthrough, chunks[0]);

    render_table_grid(f, &app.log_table, app.highlighted, app.table_scroll, chunks[1]);

    let info = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    let yours = Paragraph::new(your_calculation_text(calculation))
        .block(Block::default().borders(Borders::ALL).title("Your Calculation"))
        .style(Style::default().fg(Color::Blue));
    f.render_widget(yours, info[0]);

    if let Some(entry) = app.highlighted_entry() {
        let closest = Paragraph::new(vec![
            Line::from(format!("Number: {}", plain(entry.number))),
            Line::from(format!("log_10: {}", entry.display_value)),
        ])
        .block(Block::default().borders(Borders::ALL).title("Closest Table Value"))
        .style(Style::default().fg(Color::LightRed));
        f.render_widget(closest, info[1]);
    }
}

fn render_table_grid(f: &mut Frame, table: &LogTable, highlighted: Option<TablePosition>, scroll: usize, area: Rect) {
    let visible_rows = area.height.saturating_sub(3) as usize;
    let start = scroll.min(table.rows().len().saturating_sub(visible_rows));

    let mut headers = vec![Cell::from("N").style(Style::default().fg(Color::Yellow))];
    headers.extend(
        (0..crate::domain::TABLE_COLUMNS)
            .map(|column| Cell::from(LogTable::column_label(column)).style(Style::default().fg(Color::Yellow))),
    );

    let rows = table
        .rows()
        .iter()
        .enumerate()
        .skip(start)
        .take(visible_rows.max(1))
        .map(|(row, entries)| {
            let mut cells = vec![Cell::from(table.row_label(row)).style(Style::default().fg(Color::Yellow))];
            cells.extend(entries.iter().enumerate().map(|(column, entry)| {
                let style = if highlighted == Some(TablePosition { row, column }) {
                    Style::default().bg(Color::LightYellow).fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Cell::from(entry.display_value.clone()).style(style)
            }));
            Row::new(cells).height(1)
        });

    let mut widths = vec![Constraint::Length(5)];
    widths.extend(std::iter::repeat_n(Constraint::Length(6), crate::domain::TABLE_COLUMNS));

    let grid = Table::new(rows, widths)
        .header(Row::new(headers).height(1))
        .block(Block::default().borders(Borders::ALL))
        .column_spacing(1);
    f.render_widget(grid, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let popup_area = popup_area(f.area(), 80);

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("logbook Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> &'static str {
    r#"LOGBOOK CALCULATOR REFERENCE

=== OPERATIONS ===
Logarithm (log)         log_b(x) = ln(x) / ln(b)      x > 0
Antilogarithm (antilog) antilog_b(x) = b^x            any finite x
The base must be positive and not equal to 1.

=== FORM ===
Tab / ↓         Next field
Shift+Tab / ↑   Previous field
←→ / Space      Switch operation (on the Operation field)
←→ Home End     Move cursor (on Base/Value)
Enter           Calculate (needs both Base and Value)

=== RESULT ===
s               View step-by-step solution
t               Visual log book (base-10 table walkthrough)
Ctrl+Y          Copy result to clipboard

=== LOG TABLE ===
Rows are the leading digits (1.0, 2.0, ... 10.0)
Columns .0 to .9 add the next decimal digit
←→ / h l        Previous / next walkthrough step
                Step 2 highlights the entry nearest your number:
                the operand for log, the result for antilog

=== FILES ===
Ctrl+S          Save the current calculation as JSON
Ctrl+E          Export the log table as CSV

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calculate;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(app: &App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn calculated_app(operation: Operation, base: &str, value: &str) -> App {
        let mut app = App::default();
        app.operation = operation;
        app.base_input = base.to_string();
        app.value_input = value.to_string();
        app.calculate();
        app
    }

    #[test]
    fn test_calculation_titles() {
        let calculation = calculate(Operation::Log, 10.0, 100.0).unwrap();
        assert_eq!(calculation_title(&calculation, 6), "log_10(100) = 2.000000");
        assert_eq!(your_calculation_text(&calculation), "log_10(100) = 2.0000");

        let calculation = calculate(Operation::Antilog, 2.0, 3.0).unwrap();
        assert_eq!(your_calculation_text(&calculation), "2^3 = 8.0000");
    }

    #[test]
    fn test_step_lines_include_arrows_and_answer() {
        let calculation = calculate(Operation::Log, 10.0, 100.0).unwrap();
        let lines = step_lines(&calculation);
        // five steps, two lines each, four arrows, blank line, final answer
        assert_eq!(lines.len(), 5 * 2 + 4 + 2);
        let last: String = lines.last().unwrap().spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(last, "Final Answer: 2.000000");
    }

    #[test]
    fn test_render_form_and_result() {
        let app = calculated_app(Operation::Log, "10", "100");
        let text = screen_text(&app);
        assert!(text.contains("Logarithm (log)"));
        assert!(text.contains("2.000000"));
    }

    #[test]
    fn test_render_cursor_past_field_width_is_clamped() {
        let mut app = App::default();
        app.value_input = "9".repeat(70_000);
        app.cursor_position = app.value_input.len();

        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, &app)).unwrap();
        let position = terminal.get_cursor_position().unwrap();
        assert!(position.x < 120);
    }

    #[test]
    fn test_render_invalid_input() {
        let app = calculated_app(Operation::Log, "1", "100");
        assert!(screen_text(&app).contains("Invalid input"));
    }

    #[test]
    fn test_render_steps_popup() {
        let mut app = calculated_app(Operation::Log, "10", "100");
        app.open_steps();
        let text = screen_text(&app);
        assert!(text.contains("4.605170 / 2.302585 = 2.000000"));
    }

    #[test]
    fn test_render_log_table_popup_with_highlight() {
        let mut app = calculated_app(Operation::Antilog, "2", "3");
        app.open_log_table();
        app.next_stage();
        let text = screen_text(&app);
        assert!(text.contains("Locating Your Value"));
        assert!(text.contains("Closest Table Value"));
        assert!(text.contains("0.9031"));
    }

    #[test]
    fn test_render_help_popup() {
        let mut app = App::default();
        app.mode = AppMode::Help;
        assert!(screen_text(&app).contains("LOGBOOK CALCULATOR REFERENCE"));
    }
}
