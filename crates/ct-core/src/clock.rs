//! Wall-clock and blocking abstractions for the scheduler.
//!
//! Production code uses [`SystemClock`] and [`ThreadSuspend`]. Tests use
//! [`SimulatedClock`], which implements both traits so that every suspend
//! advances the clock by exactly the requested amount and returns at once.

use chrono::{Local, NaiveDateTime, TimeDelta};
use thiserror::Error;

/// Source of the current local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Blocks the calling thread between scheduler phases.
pub trait Suspend {
    /// Blocks for `duration`. An error aborts the current run.
    fn suspend(&self, duration: TimeDelta) -> Result<(), SuspendInterrupted>;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// A suspend that did not run to completion.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("suspend interrupted: {reason}")]
pub struct SuspendInterrupted {
    pub reason: String,
}

impl SuspendInterrupted {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Real blocking with [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSuspend;

impl Suspend for ThreadSuspend {
    fn suspend(&self, duration: TimeDelta) -> Result<(), SuspendInterrupted> {
        let duration = duration
            .to_std()
            .map_err(|_| SuspendInterrupted::new(format!("cannot sleep for {duration}")))?;
        std::thread::sleep(duration);
        Ok(())
    }
}

/// Simulated clock whose time only moves when something suspends on it.
#[cfg(any(test, feature = "test-seams"))]
#[derive(Debug)]
pub struct SimulatedClock {
    now: std::cell::Cell<NaiveDateTime>,
    suspends: std::cell::RefCell<Vec<TimeDelta>>,
}

#[cfg(any(test, feature = "test-seams"))]
impl SimulatedClock {
    /// Creates a clock frozen at `now`.
    pub const fn new(now: NaiveDateTime) -> Self {
        Self {
            now: std::cell::Cell::new(now),
            suspends: std::cell::RefCell::new(Vec::new()),
        }
    }

    /// Creates a clock from a `yyyy-MM-dd HH:mm:ss` string.
    pub fn at(s: &str) -> Self {
        Self::new(
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("valid timestamp"),
        )
    }

    /// Moves the clock forward without recording a suspend.
    pub fn advance(&self, duration: TimeDelta) {
        self.now.set(self.now.get() + duration);
    }

    /// Every suspend requested so far, in order.
    pub fn suspends(&self) -> Vec<TimeDelta> {
        self.suspends.borrow().clone()
    }
}

#[cfg(any(test, feature = "test-seams"))]
impl Clock for SimulatedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

#[cfg(any(test, feature = "test-seams"))]
impl Suspend for SimulatedClock {
    fn suspend(&self, duration: TimeDelta) -> Result<(), SuspendInterrupted> {
        self.suspends.borrow_mut().push(duration);
        self.advance(duration);
        Ok(())
    }
}
