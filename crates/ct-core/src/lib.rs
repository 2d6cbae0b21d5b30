//! Core timing and cost accounting for the contractor timer.
//!
//! This crate contains:
//! - Manual sessions: billing the span between two timestamps
//! - Automatic sessions: alternating work and break intervals until a target
//!   duration elapses, billing only the work
//! - Cost computation shared by both strategies
//! - The controller that picks a strategy and hands the result to a report sink
//!
//! Wall-clock time and blocking are injected through [`Clock`] and
//! [`Suspend`], so a multi-hour automatic run can be simulated instantly.

pub mod clock;
mod controller;
mod cost;
mod error;
pub mod report;
pub mod scheduler;
mod session;
mod types;

pub use clock::{Clock, Suspend, SuspendInterrupted, SystemClock, ThreadSuspend};
pub use controller::{SessionInputs, TimerController};
pub use cost::{compute_cost, hours};
pub use error::TimerError;
pub use report::{ReportError, ReportSink, SessionReport, TIMESTAMP_FORMAT};
pub use scheduler::{AutomaticScheduler, Phase, PhaseEvent, PomodoroConfig};
pub use session::{Session, build_manual};
pub use types::{Engagement, HourlyRate, Mode, Money, UnknownMode, ValidationError};
