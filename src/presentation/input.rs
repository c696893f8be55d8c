use crate::application::{App, AppMode, Field};
use crate::domain::fixed;
use crate::infrastructure::{copy_to_clipboard, FileExporter};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Steps | AppMode::LogTable => Self::handle_popup_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::ExportCalculation | AppMode::ExportTable => Self::handle_filename_input_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('s') => app.start_export_calculation(),
                KeyCode::Char('e') => app.start_export_table(),
                KeyCode::Char('y') => Self::copy_result(app),
                _ => {}
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Tab | KeyCode::Down => app.focus_next(),
            KeyCode::BackTab | KeyCode::Up => app.focus_previous(),
            KeyCode::Enter => app.calculate(),
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Char('s') => app.open_steps(),
            KeyCode::Char('t') => app.open_log_table(),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if app.focus == Field::Operation => {
                app.toggle_operation();
            }
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_home(),
            KeyCode::End => app.move_cursor_end(),
            KeyCode::Backspace => app.backspace(),
            KeyCode::Delete => app.delete(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }

    fn copy_result(app: &mut App) {
        let Some(text) = app.calculation().map(|c| fixed(c.result, 6)) else {
            app.status_message = Some("Nothing to copy yet - calculate first".to_string());
            return;
        };
        let result = copy_to_clipboard(&text);
        app.set_copy_result(result);
    }

    fn handle_popup_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => app.close_popup(),
            KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
            KeyCode::Right | KeyCode::Char('l') if app.mode == AppMode::LogTable => app.next_stage(),
            KeyCode::Left | KeyCode::Char('h') if app.mode == AppMode::LogTable => app.previous_stage(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.get_export_filename();
                let result = match (app.mode, app.calculation()) {
                    (AppMode::ExportCalculation, Some(calculation)) => {
                        FileExporter::export_calculation(calculation, &filename)
                    }
                    _ => FileExporter::export_table(&app.log_table, &filename),
                };
                app.set_export_result(result);
            }
            KeyCode::Esc => {
                app.cancel_filename_input();
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    app.filename_input.remove(app.cursor_position - 1);
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.filename_input.len() {
                    app.filename_input.remove(app.cursor_position);
                }
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.filename_input.len() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.filename_input.len();
            }
            KeyCode::Char(c) if c.is_ascii() => {
                app.filename_input.insert(app.cursor_position, c);
                app.cursor_position += 1;
            }
            _ => {}
        }
    }
}
