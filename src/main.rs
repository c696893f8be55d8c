//! logbook - Logarithm Calculator
//!
//! Interactive terminal calculator for logarithms and antilogarithms with
//! step-by-step solutions and a visual base-10 log table.

use clap::Parser;
use std::io;
use std::path::PathBuf;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use logbook::application::{App, AppMode};
use logbook::domain::{parse_number, Operation};
use logbook::infrastructure::{self, CliOverrides};
use logbook::presentation::{render_report, render_ui, InputHandler};

/// Logarithm calculator with step-by-step solutions
#[derive(Parser, Debug)]
#[command(name = "logbook")]
#[command(version)]
#[command(about = "Logarithm and antilogarithm calculator with step-by-step solutions")]
pub struct Args {
    /// Operation to start with: log or antilog
    #[arg(short, long)]
    pub operation: Option<Operation>,

    /// Logarithm base
    #[arg(short, long, allow_negative_numbers = true)]
    pub base: Option<f64>,

    /// Value (log) or exponent (antilog)
    #[arg(short, long, allow_negative_numbers = true)]
    pub value: Option<f64>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the result and steps to stdout instead of starting the UI
    #[arg(long, requires = "value")]
    pub print: bool,
}

/// Entry point.
///
/// Resolves configuration, sets up file logging, then either prints a single
/// calculation or runs the terminal UI until the user quits.
///
/// # Errors
///
/// Returns an error if the config file is invalid, logging cannot be set up,
/// or the terminal interface fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let cli = CliOverrides {
        base: args.base,
        operation: args.operation,
        value: args.value,
    };
    let config = infrastructure::resolve_config(args.config.as_deref(), &cli)?;

    infrastructure::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    if args.print {
        let base = parse_number(&config.base).unwrap_or(f64::NAN);
        let value = parse_number(&config.value).unwrap_or(f64::NAN);
        match render_report(config.operation, base, value) {
            Ok(report) => println!("{report}"),
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::from_config(&config);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Redraws after every key press. `q` or Esc on the calculator form quits.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc if app.mode == AppMode::Normal => {
                        info!("quit requested");
                        return Ok(());
                    }
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
