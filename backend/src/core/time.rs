//! Wall-clock time handling for the simulation
//!
//! The venue operates within a single calendar day. Every timestamp is a
//! time-of-day (`NaiveTime`) with minute resolution, written as `HH:MM`.
//! Working hours may wrap past midnight when closing is numerically earlier
//! than opening.

use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Wire format for every time-of-day in input and output
pub const TIME_FORMAT: &str = "%H:%M";

const MINUTES_PER_HOUR: i64 = 60;

/// Parse a strict `HH:MM` time-of-day
///
/// Returns `None` unless the text is exactly two hour digits, a colon, and
/// two minute digits forming a valid time.
///
/// # Example
/// ```
/// use club_simulator_core::core::time::parse_clock;
///
/// assert!(parse_clock("09:05").is_some());
/// assert!(parse_clock("9:05").is_none());
/// assert!(parse_clock("24:00").is_none());
/// ```
pub fn parse_clock(text: &str) -> Option<NaiveTime> {
    let bytes = text.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    NaiveTime::parse_from_str(text, TIME_FORMAT).ok()
}

/// Format a time-of-day as `HH:MM`
///
/// # Example
/// ```
/// use chrono::NaiveTime;
/// use club_simulator_core::core::time::format_clock;
///
/// let t = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
/// assert_eq!(format_clock(t), "09:05");
/// ```
pub fn format_clock(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Time elapsed from `from` to `to` within one circular day
///
/// If `to` is numerically earlier than `from`, the interval is taken to
/// cross midnight and a full day is added.
pub fn elapsed(from: NaiveTime, to: NaiveTime) -> TimeDelta {
    let delta = to.signed_duration_since(from);
    if delta < TimeDelta::zero() {
        delta + TimeDelta::days(1)
    } else {
        delta
    }
}

/// Format an accumulated duration in whole minutes as `HH:MM`
///
/// Hours are not wrapped at 24, so long totals stay readable.
///
/// # Example
/// ```
/// use club_simulator_core::core::time::format_duration;
///
/// assert_eq!(format_duration(595), "09:55");
/// assert_eq!(format_duration(26 * 60 + 1), "26:01");
/// ```
pub fn format_duration(total_minutes: i64) -> String {
    let total_minutes = total_minutes.max(0);
    format!(
        "{:02}:{:02}",
        total_minutes / MINUTES_PER_HOUR,
        total_minutes % MINUTES_PER_HOUR
    )
}

/// Parse an `HH:MM` duration produced by [`format_duration`]
///
/// Unlike [`parse_clock`] the hour part is unbounded.
pub fn parse_duration(text: &str) -> Option<i64> {
    let (hours, minutes) = text.split_once(':')?;
    if hours.len() < 2 || minutes.len() != 2 {
        return None;
    }
    let hours: i64 = hours.parse().ok()?;
    let minutes: i64 = minutes.parse().ok()?;
    if hours < 0 || !(0..MINUTES_PER_HOUR).contains(&minutes) {
        return None;
    }
    Some(hours * MINUTES_PER_HOUR + minutes)
}

/// Opening and closing time of the venue
///
/// # Example
/// ```
/// use club_simulator_core::core::time::{parse_clock, WorkingHours};
///
/// let hours = WorkingHours::new(parse_clock("09:00").unwrap(), parse_clock("19:00").unwrap());
/// assert!(hours.contains(parse_clock("09:00").unwrap()));
/// assert!(hours.contains(parse_clock("19:00").unwrap()));
/// assert!(!hours.contains(parse_clock("08:59").unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    #[serde(with = "clock_format")]
    open: NaiveTime,
    #[serde(with = "clock_format")]
    close: NaiveTime,
}

impl WorkingHours {
    /// Create working hours; `close < open` means the day wraps past midnight
    pub fn new(open: NaiveTime, close: NaiveTime) -> Self {
        Self { open, close }
    }

    pub fn open(&self) -> NaiveTime {
        self.open
    }

    pub fn close(&self) -> NaiveTime {
        self.close
    }

    /// Whether closing falls on the next calendar day
    pub fn wraps(&self) -> bool {
        self.open > self.close
    }

    /// Check whether `time` lies inside working hours, both ends inclusive
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.wraps() {
            time >= self.open || time <= self.close
        } else {
            time >= self.open && time <= self.close
        }
    }
}

/// Serde adapter that writes `NaiveTime` as `HH:MM`
pub mod clock_format {
    use super::{format_clock, parse_clock};
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_clock(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_clock(&text).ok_or_else(|| D::Error::custom(format!("invalid time of day: {text}")))
    }
}
