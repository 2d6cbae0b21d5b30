//! Cost of worked time.

use chrono::TimeDelta;

use crate::types::{HourlyRate, Money};

pub(crate) const MS_PER_HOUR: f64 = 3_600_000.0;

/// Fractional hours in `duration`, at millisecond precision.
#[allow(clippy::cast_precision_loss)]
pub fn hours(duration: TimeDelta) -> f64 {
    duration.num_milliseconds() as f64 / MS_PER_HOUR
}

/// Cost of `duration` billed at `rate`. No rounding is applied.
///
/// `duration` is expected to be non-negative; callers reject negative spans
/// before getting here.
pub fn compute_cost(duration: TimeDelta, rate: HourlyRate) -> Money {
    Money::new(hours(duration) * rate.value())
}
