//! Command implementations.

pub mod config;
pub mod track;
pub mod util;
