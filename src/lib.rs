//! logbook - Logarithm Calculator Library
//!
//! Computes logarithms and antilogarithms, derives step-by-step solutions
//! and looks numbers up in a base-10 log table, with a terminal UI on top.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
