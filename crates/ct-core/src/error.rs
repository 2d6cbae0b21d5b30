//! Error types surfaced by the timing engine.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::clock::SuspendInterrupted;
use crate::report::ReportError;
use crate::types::UnknownMode;

/// A terminal failure of one timing run. No session is reported when a run
/// fails.
#[derive(Debug, Error)]
pub enum TimerError {
    /// The mode selector was neither manual nor automatic.
    #[error(transparent)]
    InvalidMode(#[from] UnknownMode),

    /// A manual session ended before it started.
    #[error("end time {end} is before start time {start}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// An automatic target duration was zero, negative or unrepresentable.
    #[error("target duration must be a positive number of hours, got {hours}")]
    InvalidDuration { hours: f64 },

    /// The selected mode needs an input the caller did not provide.
    #[error("{mode} mode requires {input}")]
    MissingInput {
        mode: crate::Mode,
        input: &'static str,
    },

    /// Blocking between phases was interrupted.
    #[error("automatic session aborted: {0}")]
    SuspendInterrupted(#[from] SuspendInterrupted),

    /// The finished session could not be handed to the report renderer.
    #[error("failed to deliver report: {0}")]
    Report(#[from] ReportError),
}
