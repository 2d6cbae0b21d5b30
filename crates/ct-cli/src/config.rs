//! Configuration loading and management.

use std::path::{Path, PathBuf};

use ct_core::{PomodoroConfig, ValidationError};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Report file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory reports are written to.
    pub output_dir: PathBuf,

    /// Currency label printed before costs.
    pub currency: String,

    /// Rate used when `--rate` is not given. Prompted for when unset.
    pub hourly_rate: Option<f64>,

    /// Length of an automatic work interval.
    pub work_minutes: u32,

    /// Length of an automatic break interval.
    pub break_minutes: u32,

    /// Report file format.
    pub format: ReportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            currency: "NRS".to_string(),
            hourly_rate: None,
            work_minutes: 45,
            break_minutes: 15,
            format: ReportFormat::Text,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (CT_*)
        figment = figment.merge(Env::prefixed("CT_"));

        figment.extract()
    }

    /// Work and break interval lengths for automatic sessions.
    pub fn pomodoro(&self) -> Result<PomodoroConfig, ValidationError> {
        PomodoroConfig::new(self.work_minutes, self.break_minutes)
    }
}

/// Returns the platform-specific config directory for ct.
///
/// On Linux: `~/.config/ct`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ct"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use chrono::TimeDelta;

    #[test]
    fn test_dirs_config_path_ends_with_ct() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "ct");
    }

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.currency, "NRS");
        assert_eq!(config.format, ReportFormat::Text);
        assert_eq!(config.pomodoro().unwrap(), PomodoroConfig::default());
        assert!(config.hourly_rate.is_none());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
output_dir = "/tmp/reports"
currency = "USD"
hourly_rate = 42.5
work_minutes = 25
break_minutes = 5
format = "json"
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(config.currency, "USD");
        assert_eq!(config.hourly_rate, Some(42.5));
        assert_eq!(config.format, ReportFormat::Json);
        let pomodoro = config.pomodoro().unwrap();
        assert_eq!(pomodoro.work(), TimeDelta::minutes(25));
        assert_eq!(pomodoro.rest(), TimeDelta::minutes(5));
    }

    #[test]
    fn test_zero_interval_in_config_is_rejected() {
        let config = Config {
            work_minutes: 0,
            ..Config::default()
        };
        assert!(config.pomodoro().is_err());
    }

    #[test]
    fn test_unknown_format_fails_to_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"format = "pdf""#).unwrap();
        file.flush().unwrap();

        assert!(Config::load_from(Some(file.path())).is_err());
    }

    #[test]
    fn test_report_format_extensions() {
        assert_eq!(ReportFormat::Text.extension(), "txt");
        assert_eq!(ReportFormat::Json.extension(), "json");
    }
}
