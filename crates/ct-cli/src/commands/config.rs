//! Config command: shows the effective configuration.

use std::io::Write;

use anyhow::{Context, Result};

use crate::config::{Config, dirs_config_path};

/// Prints the merged configuration as JSON, followed by the default config
/// file location.
pub fn run<W: Write>(output: &mut W, config: &Config) -> Result<()> {
    let json = serde_json::to_string_pretty(config).context("failed to serialize config")?;
    writeln!(output, "{json}")?;

    match dirs_config_path() {
        Some(dir) => writeln!(output, "Config file: {}", dir.join("config.toml").display())?,
        None => writeln!(output, "Config file: (no config directory on this platform)")?,
    }
    Ok(())
}
