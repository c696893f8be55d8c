//! Presentation layer handling terminal UI and user input.
//!
//! This module manages the terminal user interface using ratatui,
//! handles keyboard input, and renders the plain-text report used by
//! `--print`.

pub mod ui;
pub mod input;
pub mod report;

pub use ui::*;
pub use input::*;
pub use report::*;
