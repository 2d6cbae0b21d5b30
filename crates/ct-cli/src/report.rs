//! Report rendering and file output.
//!
//! Every report carries the same fields: contractor, project, start and end
//! time, total duration in hours and total cost, both to two decimal places.

use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, Timelike};
use ct_core::{Clock, ReportError, ReportSink, Session, SessionReport, SystemClock};
use serde::Serialize;
use tracing::info;

use crate::config::ReportFormat;

/// Formats the human-readable report.
pub fn format_report(session: &Session, currency: &str) -> String {
    let report = SessionReport::from(session);
    format!(
        "Time Tracking Cost Report

Contractor:     {contractor}
Project:        {project}
Mode:           {mode}
Start Time:     {start}
End Time:       {end}
Total Duration: {hours} hours
Time Span:      {span} hours
Total Cost:     {currency} {cost}

Generated by ct
",
        contractor = report.contractor_name,
        project = report.project_name,
        mode = report.mode,
        start = report.start_time,
        end = report.end_time,
        hours = report.total_duration_hours,
        span = report.span_hours,
        cost = report.total_cost,
    )
}

/// JSON report structure.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: SessionReport,
    currency: &'a str,
}

/// Formats the report as JSON.
pub fn format_report_json(session: &Session, currency: &str) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        report: SessionReport::from(session),
        currency,
    };
    serde_json::to_string_pretty(&report)
}

/// Report file name for a report generated at `at`, e.g. `CostReport 14h.5m.9s.txt`.
pub fn report_file_name(at: NaiveDateTime, format: ReportFormat) -> String {
    format!(
        "CostReport {}h.{}m.{}s.{}",
        at.hour(),
        at.minute(),
        at.second(),
        format.extension()
    )
}

/// Writes each delivered session to a file in a directory.
///
/// The directory is created on first delivery. A report generated in the same
/// second as an earlier one replaces it.
pub struct FileReportSink<C = SystemClock> {
    dir: PathBuf,
    format: ReportFormat,
    currency: String,
    clock: C,
    written: Option<PathBuf>,
}

impl FileReportSink {
    pub fn new(dir: impl Into<PathBuf>, format: ReportFormat, currency: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            format,
            currency: currency.into(),
            clock: SystemClock,
            written: None,
        }
    }
}

impl<C: Clock> FileReportSink<C> {
    /// Uses `clock` to timestamp report file names.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> FileReportSink<C2> {
        FileReportSink {
            dir: self.dir,
            format: self.format,
            currency: self.currency,
            clock,
            written: self.written,
        }
    }

    /// Path of the most recently written report.
    pub fn written(&self) -> Option<&Path> {
        self.written.as_deref()
    }

    fn render(&self, session: &Session) -> Result<String, ReportError> {
        Ok(match self.format {
            ReportFormat::Text => format_report(session, &self.currency),
            ReportFormat::Json => format_report_json(session, &self.currency)?,
        })
    }
}

impl<C: Clock> ReportSink for FileReportSink<C> {
    fn deliver(&mut self, session: &Session) -> Result<(), ReportError> {
        let contents = self.render(session)?;
        std::fs::create_dir_all(&self.dir)?;

        let path = self
            .dir
            .join(report_file_name(self.clock.now(), self.format));
        std::fs::write(&path, contents)?;
        info!(path = %path.display(), "report written");

        self.written = Some(path);
        Ok(())
    }
}
