//! poliza-cli library root.
//!
//! Argument parsing, configuration, session state, and output rendering are
//! exposed here so integration tests can exercise them without spawning the
//! binary.

pub mod cli;
pub mod config;
pub mod render;
pub mod state;
