//! tbx CLI library
//!
//! This library provides the command-line interface for batch replacement,
//! realignment and checking of Toolbox corpora and dictionaries.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
