//! Completed timing sessions and the manual timing strategy.

use chrono::{NaiveDateTime, TimeDelta};

use crate::cost::{compute_cost, hours};
use crate::error::TimerError;
use crate::types::{Engagement, HourlyRate, Mode, Money};

/// One completed timing run with its computed cost.
///
/// Built once by a timing strategy and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    engagement: Engagement,
    mode: Mode,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    worked_duration: TimeDelta,
    total_cost: Money,
}

impl Session {
    pub(crate) fn new(
        engagement: Engagement,
        mode: Mode,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        worked_duration: TimeDelta,
        rate: HourlyRate,
    ) -> Self {
        Self {
            engagement,
            mode,
            start_time,
            end_time,
            worked_duration,
            total_cost: compute_cost(worked_duration, rate),
        }
    }

    pub fn contractor_name(&self) -> &str {
        self.engagement.contractor_name()
    }

    pub fn project_name(&self) -> &str {
        self.engagement.project_name()
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub const fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    /// Billable time. Excludes breaks in automatic mode.
    pub const fn worked_duration(&self) -> TimeDelta {
        self.worked_duration
    }

    pub fn worked_hours(&self) -> f64 {
        hours(self.worked_duration)
    }

    pub const fn total_cost(&self) -> Money {
        self.total_cost
    }
}

/// Builds a session from an operator-entered start and end time.
///
/// The whole span between the two timestamps is billed; manual mode does
/// not insert breaks. An end before the start is rejected rather than
/// producing a negative cost.
pub fn build_manual(
    engagement: Engagement,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    rate: HourlyRate,
) -> Result<Session, TimerError> {
    if end_time < start_time {
        return Err(TimerError::InvalidRange {
            start: start_time,
            end: end_time,
        });
    }

    Ok(Session::new(
        engagement,
        Mode::Manual,
        start_time,
        end_time,
        end_time - start_time,
        rate,
    ))
}
