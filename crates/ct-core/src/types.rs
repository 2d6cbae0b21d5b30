//! Core value types with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The hourly rate was below zero.
    #[error("hourly rate cannot be negative, got {value}")]
    NegativeRate { value: f64 },

    /// The hourly rate was NaN or infinite.
    #[error("hourly rate must be a finite number, got {value}")]
    NonFiniteRate { value: f64 },

    /// A pomodoro interval had zero length.
    #[error("{field} must be at least one minute")]
    ZeroInterval { field: &'static str },
}

/// How a session was timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Caller-supplied start and end timestamps.
    Manual,
    /// Work/break cycles run until a target duration elapses.
    Automatic,
}

impl Mode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Automatic => "automatic",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = UnknownMode;

    /// Parses the operator's menu choice. `1` and `2` are the menu numbers;
    /// the names are accepted for flags and config files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "manual" => Ok(Self::Manual),
            "2" | "automatic" | "auto" => Ok(Self::Automatic),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Error type for unrecognized mode selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(String);

impl UnknownMode {
    /// The rejected selector as entered.
    pub fn selector(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnknownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid mode {:?}: expected 1 (manual) or 2 (automatic)", self.0)
    }
}

impl std::error::Error for UnknownMode {}

/// A billing rate per hour of worked time.
///
/// Always finite and non-negative. Fixed for the lifetime of one controller.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct HourlyRate(f64);

impl HourlyRate {
    /// A rate of zero.
    pub const ZERO: Self = Self(0.0);

    /// Creates a rate after validation.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteRate { value });
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeRate { value });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for HourlyRate {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HourlyRate> for f64 {
    fn from(rate: HourlyRate) -> Self {
        rate.0
    }
}

impl fmt::Display for HourlyRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A monetary amount. Unrounded; displays with two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(into = "f64")]
pub struct Money(f64);

impl Money {
    pub(crate) const fn new(amount: f64) -> Self {
        Self(amount)
    }

    #[must_use]
    pub const fn amount(self) -> f64 {
        self.0
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Who is billing and for which project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Engagement {
    contractor_name: String,
    project_name: String,
}

impl Engagement {
    /// Creates an engagement; both names must be non-blank.
    pub fn new(
        contractor_name: impl Into<String>,
        project_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let contractor_name = contractor_name.into().trim().to_string();
        let project_name = project_name.into().trim().to_string();
        if contractor_name.is_empty() {
            return Err(ValidationError::Empty {
                field: "contractor name",
            });
        }
        if project_name.is_empty() {
            return Err(ValidationError::Empty {
                field: "project name",
            });
        }
        Ok(Self {
            contractor_name,
            project_name,
        })
    }

    pub fn contractor_name(&self) -> &str {
        &self.contractor_name
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }
}
