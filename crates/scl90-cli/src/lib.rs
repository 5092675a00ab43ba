//! scl90-cli
//!
//! The `scl90` binary: terminal form, headless scoring and report
//! subcommands, user config and logging setup.

pub mod commands;
pub mod config;
pub mod input;
pub mod logging;
pub mod tui;
