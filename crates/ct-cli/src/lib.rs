//! Contractor timer CLI library.
//!
//! This crate provides the console front end for `ct-core`: argument parsing,
//! configuration, prompts and report files.

mod cli;
pub mod commands;
mod config;
pub mod prompt;
pub mod report;
pub mod stop;

pub use cli::{Cli, Commands, TrackArgs};
pub use config::{Config, ReportFormat, dirs_config_path};
