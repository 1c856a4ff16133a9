//! Table billing
//!
//! Occupation is billed per started hour: any partial hour rounds up, so a
//! one-minute stay costs a full hour. A zero-length occupation costs nothing.
//!
//! CRITICAL: prices and revenue are i64 whole currency units

use chrono::TimeDelta;

const MINUTES_PER_HOUR: i64 = 60;

/// Number of hours billed for an occupation of `minutes`
///
/// # Example
/// ```
/// use club_simulator_core::billing::billable_hours;
///
/// assert_eq!(billable_hours(0), 0);
/// assert_eq!(billable_hours(1), 1);
/// assert_eq!(billable_hours(60), 1);
/// assert_eq!(billable_hours(61), 2);
/// ```
pub fn billable_hours(minutes: i64) -> i64 {
    if minutes <= 0 {
        return 0;
    }
    (minutes + MINUTES_PER_HOUR - 1) / MINUTES_PER_HOUR
}

/// Charge for an occupation lasting `elapsed` at `hourly_price`
///
/// Returns None when the amount does not fit in an i64.
///
/// # Example
/// ```
/// use chrono::TimeDelta;
/// use club_simulator_core::billing::charge;
///
/// assert_eq!(charge(TimeDelta::minutes(595), 10), Some(100));
/// assert_eq!(charge(TimeDelta::minutes(30), 10), Some(10));
/// assert_eq!(charge(TimeDelta::minutes(61), i64::MAX), None);
/// ```
pub fn charge(elapsed: TimeDelta, hourly_price: i64) -> Option<i64> {
    billable_hours(elapsed.num_minutes()).checked_mul(hourly_price)
}
