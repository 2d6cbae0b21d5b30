//! Mode dispatch and report hand-off.

use std::sync::atomic::AtomicBool;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::clock::{Clock, Suspend};
use crate::error::TimerError;
use crate::report::ReportSink;
use crate::scheduler::{AutomaticScheduler, PhaseEvent, PomodoroConfig};
use crate::session::{Session, build_manual};
use crate::types::{Engagement, HourlyRate, Mode};

/// Pre-validated operator input for one run.
///
/// Only the fields needed by the selected mode are read.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInputs {
    pub engagement: Engagement,
    /// Start and end time for manual mode.
    pub window: Option<(NaiveDateTime, NaiveDateTime)>,
    /// Target duration for automatic mode.
    pub target_hours: Option<f64>,
}

impl SessionInputs {
    pub fn manual(engagement: Engagement, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            engagement,
            window: Some((start, end)),
            target_hours: None,
        }
    }

    pub fn automatic(engagement: Engagement, target_hours: f64) -> Self {
        Self {
            engagement,
            window: None,
            target_hours: Some(target_hours),
        }
    }
}

/// Runs one session in the selected mode and forwards it to a report sink.
///
/// The hourly rate is fixed for the lifetime of the controller.
pub struct TimerController<'a, C, S> {
    rate: HourlyRate,
    config: PomodoroConfig,
    clock: &'a C,
    suspend: &'a S,
    cancel: Option<&'a AtomicBool>,
}

impl<'a, C: Clock, S: Suspend> TimerController<'a, C, S> {
    pub const fn new(
        rate: HourlyRate,
        config: PomodoroConfig,
        clock: &'a C,
        suspend: &'a S,
    ) -> Self {
        Self {
            rate,
            config,
            clock,
            suspend,
            cancel: None,
        }
    }

    /// Lets automatic runs stop gracefully at a phase boundary.
    #[must_use]
    pub fn with_cancellation(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub const fn rate(&self) -> HourlyRate {
        self.rate
    }

    pub fn run<R: ReportSink>(
        &self,
        selector: &str,
        inputs: SessionInputs,
        sink: &mut R,
    ) -> Result<Session, TimerError> {
        self.run_observed(selector, inputs, sink, |_| {})
    }

    /// Parses `selector`, runs the matching strategy and delivers the
    /// session to `sink`. Any failure is terminal and nothing is delivered.
    pub fn run_observed<R, F>(
        &self,
        selector: &str,
        inputs: SessionInputs,
        sink: &mut R,
        observer: F,
    ) -> Result<Session, TimerError>
    where
        R: ReportSink,
        F: FnMut(&PhaseEvent),
    {
        let mode: Mode = selector.parse()?;
        debug!(%mode, rate = %self.rate, "dispatching session");

        let session = match mode {
            Mode::Manual => {
                let (start, end) = inputs.window.ok_or(TimerError::MissingInput {
                    mode,
                    input: "a start and end time",
                })?;
                build_manual(inputs.engagement, start, end, self.rate)?
            }
            Mode::Automatic => {
                let hours = inputs.target_hours.ok_or(TimerError::MissingInput {
                    mode,
                    input: "a target duration",
                })?;
                let mut scheduler = AutomaticScheduler::new(self.config, self.clock, self.suspend);
                if let Some(flag) = self.cancel {
                    scheduler = scheduler.with_cancellation(flag);
                }
                scheduler.run_observed(inputs.engagement, hours, self.rate, observer)?
            }
        };

        sink.deliver(&session)?;
        info!(
            %mode,
            worked_hours = session.worked_hours(),
            total_cost = %session.total_cost(),
            "session reported"
        );

        Ok(session)
    }
}
