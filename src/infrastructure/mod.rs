//! Infrastructure layer providing external service integrations.
//!
//! Configuration loading, log file setup, file exports and the system
//! clipboard live here, away from the pure calculation engine.

pub mod clipboard;
pub mod config;
pub mod export;
pub mod logging;

pub use clipboard::*;
pub use config::*;
pub use export::*;
pub use logging::*;
