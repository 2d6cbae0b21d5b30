//! Hand-off of finished sessions to a report renderer.

use serde::Serialize;
use thiserror::Error;

use crate::cost::hours;
use crate::session::Session;
use crate::types::Mode;

/// Timestamp layout used in rendered reports and operator input.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Report delivery errors.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing the rendered report failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Serializing the report failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Receives each finished session exactly once.
pub trait ReportSink {
    fn deliver(&mut self, session: &Session) -> Result<(), ReportError>;
}

/// Collects sessions in memory.
impl ReportSink for Vec<Session> {
    fn deliver(&mut self, session: &Session) -> Result<(), ReportError> {
        self.push(session.clone());
        Ok(())
    }
}

/// The fields every rendered report carries, formatted for display.
///
/// Durations are hours and costs are currency units, both with two decimal
/// places. `total_duration_hours` is the billed time. `span_hours` is the
/// distance from start to end, which in automatic mode also covers breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub contractor_name: String,
    pub project_name: String,
    pub mode: Mode,
    pub start_time: String,
    pub end_time: String,
    pub total_duration_hours: String,
    pub span_hours: String,
    pub total_cost: String,
}

impl From<&Session> for SessionReport {
    fn from(session: &Session) -> Self {
        Self {
            contractor_name: session.contractor_name().to_string(),
            project_name: session.project_name().to_string(),
            mode: session.mode(),
            start_time: session.start_time().format(TIMESTAMP_FORMAT).to_string(),
            end_time: session.end_time().format(TIMESTAMP_FORMAT).to_string(),
            total_duration_hours: format!("{:.2}", session.worked_hours()),
            span_hours: format!("{:.2}", hours(session.end_time() - session.start_time())),
            total_cost: session.total_cost().to_string(),
        }
    }
}
