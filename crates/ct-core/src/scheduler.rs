//! Automatic work/break scheduler.
//!
//! Alternates fixed-length work and break intervals from the moment a run
//! starts until a target duration has elapsed, billing only work intervals.
//!
//! # Algorithm Summary
//!
//! 1. `end = now + target`
//! 2. While `now < end`: block for a full work interval and bill it
//! 3. If `now` is still before `end`, block for a full break interval
//!
//! The deadline is only checked after a suspend returns, so the last work
//! interval may run past `end`. It is billed in full, and the session still
//! reports the nominal `end` as its end time.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{NaiveDateTime, TimeDelta};
use tracing::{debug, info, warn};

use crate::clock::{Clock, Suspend};
use crate::cost::MS_PER_HOUR;
use crate::error::TimerError;
use crate::session::Session;
use crate::types::{Engagement, HourlyRate, Mode, ValidationError};

/// Work and break interval lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PomodoroConfig {
    work: TimeDelta,
    rest: TimeDelta,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work: TimeDelta::minutes(45),
            rest: TimeDelta::minutes(15),
        }
    }
}

impl PomodoroConfig {
    /// Creates a config from whole minutes. Both intervals must be non-zero.
    pub fn new(work_minutes: u32, break_minutes: u32) -> Result<Self, ValidationError> {
        if work_minutes == 0 {
            return Err(ValidationError::ZeroInterval {
                field: "work interval",
            });
        }
        if break_minutes == 0 {
            return Err(ValidationError::ZeroInterval {
                field: "break interval",
            });
        }
        Ok(Self {
            work: TimeDelta::minutes(i64::from(work_minutes)),
            rest: TimeDelta::minutes(i64::from(break_minutes)),
        })
    }

    pub const fn work(&self) -> TimeDelta {
        self.work
    }

    pub const fn rest(&self) -> TimeDelta {
        self.rest
    }
}

/// Scheduler phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Working,
    OnBreak,
}

/// Progress notifications emitted while a run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseEvent {
    /// A work interval is about to block.
    WorkStarted {
        from: NaiveDateTime,
        until: NaiveDateTime,
    },
    /// A break interval is about to block.
    BreakStarted {
        from: NaiveDateTime,
        until: NaiveDateTime,
    },
    /// The run is over and a session is about to be built.
    Finished {
        worked: TimeDelta,
        work_intervals: u32,
        cancelled: bool,
    },
}

/// Mutable state of a single run.
#[derive(Debug)]
struct SchedulerState {
    elapsed_worked: TimeDelta,
    phase: Phase,
    cycles_completed: u32,
}

impl SchedulerState {
    const fn new() -> Self {
        Self {
            elapsed_worked: TimeDelta::zero(),
            phase: Phase::Working,
            cycles_completed: 0,
        }
    }
}

/// Runs automatic sessions against an injected clock and suspend.
///
/// An optional cancellation flag is read only at phase boundaries: before a
/// work interval starts and before a break starts. Setting it never cuts an
/// interval short.
pub struct AutomaticScheduler<'a, C, S> {
    config: PomodoroConfig,
    clock: &'a C,
    suspend: &'a S,
    cancel: Option<&'a AtomicBool>,
}

impl<'a, C: Clock, S: Suspend> AutomaticScheduler<'a, C, S> {
    pub const fn new(config: PomodoroConfig, clock: &'a C, suspend: &'a S) -> Self {
        Self {
            config,
            clock,
            suspend,
            cancel: None,
        }
    }

    /// Stops the run gracefully at the next phase boundary once `flag` is set.
    #[must_use]
    pub fn with_cancellation(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn run(
        &self,
        engagement: Engagement,
        target_hours: f64,
        rate: HourlyRate,
    ) -> Result<Session, TimerError> {
        self.run_observed(engagement, target_hours, rate, |_| {})
    }

    /// Like [`run`](Self::run), reporting each phase to `observer`.
    ///
    /// A cancelled run still produces a session: it bills the work intervals
    /// completed so far and ends at the boundary where the stop was seen.
    pub fn run_observed<F>(
        &self,
        engagement: Engagement,
        target_hours: f64,
        rate: HourlyRate,
        mut observer: F,
    ) -> Result<Session, TimerError>
    where
        F: FnMut(&PhaseEvent),
    {
        let invalid = || TimerError::InvalidDuration {
            hours: target_hours,
        };
        let span = target_span(target_hours).ok_or_else(invalid)?;
        let start_time = self.clock.now();
        let end_time = start_time.checked_add_signed(span).ok_or_else(invalid)?;

        info!(
            %start_time,
            %end_time,
            target_hours,
            contractor = engagement.contractor_name(),
            project = engagement.project_name(),
            "automatic session started"
        );

        let mut state = SchedulerState::new();
        let mut stopped_at = None;

        while self.clock.now() < end_time {
            if self.is_cancelled() {
                stopped_at = Some(self.clock.now());
                break;
            }

            let from = self.clock.now();
            observer(&PhaseEvent::WorkStarted {
                from,
                until: from + self.config.work,
            });
            debug!(%from, cycle = state.cycles_completed + 1, "work interval");
            self.block(self.config.work)?;
            state.elapsed_worked += self.config.work;
            state.cycles_completed += 1;

            let now = self.clock.now();
            if now >= end_time {
                break;
            }
            if self.is_cancelled() {
                stopped_at = Some(now);
                break;
            }

            state.phase = Phase::OnBreak;
            observer(&PhaseEvent::BreakStarted {
                from: now,
                until: now + self.config.rest,
            });
            debug!(from = %now, phase = ?state.phase, "break interval");
            self.block(self.config.rest)?;
            state.phase = Phase::Working;
        }

        let cancelled = stopped_at.is_some();
        observer(&PhaseEvent::Finished {
            worked: state.elapsed_worked,
            work_intervals: state.cycles_completed,
            cancelled,
        });
        info!(
            worked_minutes = state.elapsed_worked.num_minutes(),
            work_intervals = state.cycles_completed,
            cancelled,
            "automatic session finished"
        );

        Ok(Session::new(
            engagement,
            Mode::Automatic,
            start_time,
            stopped_at.unwrap_or(end_time),
            state.elapsed_worked,
            rate,
        ))
    }

    fn block(&self, duration: TimeDelta) -> Result<(), TimerError> {
        self.suspend.suspend(duration).map_err(|err| {
            warn!(error = %err, "suspend interrupted, discarding session");
            TimerError::from(err)
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Converts a target in hours to a span, rejecting anything that is not
/// positive or not representable. Positive targets below a millisecond are
/// raised to one.
#[allow(clippy::cast_possible_truncation)]
fn target_span(hours: f64) -> Option<TimeDelta> {
    if !hours.is_finite() || hours <= 0.0 {
        return None;
    }
    let ms = (hours * MS_PER_HOUR).round().max(1.0);
    if ms >= 9.2e18 {
        return None;
    }
    TimeDelta::try_milliseconds(ms as i64)
}
