//! Application layer managing state and user workflows.
//!
//! This module sits between the calculation engine and the terminal UI,
//! holding the form inputs, the last outcome and which popup is open.

pub mod state;

pub use state::*;
