//! Day log reader
//!
//! Reads the venue configuration and the event list from the text format:
//!
//! ```text
//! 3
//! 09:00 19:00
//! 10
//! 08:48 1 client1
//! 09:54 2 client1 1
//! ```
//!
//! Line 1 is the table count, line 2 the opening and closing time, line 3
//! the hourly price; every further line is one event. The first malformed
//! line stops the read and is reported with its tokens so the caller can
//! echo it back. Events are returned stably sorted by time.

use crate::core::time::{parse_clock, WorkingHours};
use crate::models::client::is_valid_username;
use crate::models::event::{sort_chronologically, Event, EventKind};
use crate::orchestrator::VenueConfig;
use std::fmt;
use thiserror::Error;

/// Errors raised while reading a day log
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    /// The log ended before the configuration was complete
    #[error("ReadDataError: missing {expected}")]
    MissingLine { expected: &'static str },

    /// A line failed validation; `tokens` is what the line held
    #[error("malformed line {line}: {}", Tokens(.tokens))]
    Malformed { line: usize, tokens: Vec<String> },
}

impl InputError {
    /// Offending tokens rendered as `[tok tok]`, empty brackets when none
    pub fn offending_tokens(&self) -> Option<String> {
        match self {
            InputError::Malformed { tokens, .. } => Some(Tokens(tokens).to_string()),
            InputError::MissingLine { .. } => None,
        }
    }
}

struct Tokens<'a>(&'a [String]);

impl fmt::Display for Tokens<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(" "))
    }
}

/// A fully read day log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    pub config: VenueConfig,
    pub events: Vec<Event>,
}

/// Read a complete day log
///
/// # Example
/// ```
/// use club_simulator_core::input;
///
/// let parsed = input::parse("2\n09:00 19:00\n10\n09:10 1 bob\n09:05 1 alice\n").unwrap();
/// assert_eq!(parsed.config.table_count, 2);
/// assert_eq!(parsed.events[0].client(), "alice");
/// ```
pub fn parse(text: &str) -> Result<ParsedInput, InputError> {
    let mut lines = text.lines().enumerate().map(|(idx, line)| (idx + 1, line));

    let (number, line) = lines.next().ok_or(InputError::MissingLine {
        expected: "table count",
    })?;
    let table_count = positive_int(line).ok_or_else(|| whole_line(number, line))?;

    let (number, line) = lines.next().ok_or(InputError::MissingLine {
        expected: "working hours",
    })?;
    let hours = working_hours(number, line)?;

    let (number, line) = lines.next().ok_or(InputError::MissingLine {
        expected: "hourly price",
    })?;
    let hourly_price = positive_int(line).ok_or_else(|| whole_line(number, line))?;

    let config = VenueConfig {
        hours,
        hourly_price: i64::try_from(hourly_price).map_err(|_| whole_line(number, line))?,
        table_count,
    };

    let mut events = lines
        .map(|(number, line)| event(number, line, config.table_count))
        .collect::<Result<Vec<_>, _>>()?;
    sort_chronologically(&mut events);

    Ok(ParsedInput { config, events })
}

fn positive_int(text: &str) -> Option<usize> {
    text.parse::<usize>().ok().filter(|value| *value > 0)
}

fn whole_line(line: usize, text: &str) -> InputError {
    InputError::Malformed {
        line,
        tokens: if text.is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        },
    }
}

fn working_hours(number: usize, line: &str) -> Result<WorkingHours, InputError> {
    let times: Vec<&str> = line.split(' ').collect();
    let malformed = || InputError::Malformed {
        line: number,
        tokens: times.iter().map(|t| t.to_string()).collect(),
    };

    if line.is_empty() {
        return Err(whole_line(number, line));
    }
    let [open, close] = times.as_slice() else {
        return Err(malformed());
    };
    let open = parse_clock(open).ok_or_else(malformed)?;
    let close = parse_clock(close).ok_or_else(malformed)?;
    if close < open {
        return Err(malformed());
    }
    Ok(WorkingHours::new(open, close))
}

fn event(number: usize, line: &str, table_count: usize) -> Result<Event, InputError> {
    let malformed = || whole_line(number, line);
    let parts: Vec<&str> = line.split_whitespace().collect();
    if !(3..=4).contains(&parts.len()) {
        return Err(malformed());
    }

    let time = parse_clock(parts[0]).ok_or_else(malformed)?;
    let code = positive_int(parts[1])
        .and_then(|code| u32::try_from(code).ok())
        .ok_or_else(malformed)?;
    let seat_request = code == EventKind::SeatRequest.code();
    if seat_request && parts.len() < 4 {
        return Err(malformed());
    }

    let client = parts[2];
    if !is_valid_username(client) {
        return Err(malformed());
    }

    let table = match parts.get(3) {
        Some(_) if !seat_request => return Err(malformed()),
        Some(raw) => positive_int(raw)
            .filter(|table| *table <= table_count)
            .ok_or_else(malformed)?,
        None => 0,
    };

    Ok(Event::new(time, code, client, table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_render_like_a_list() {
        let err = InputError::Malformed {
            line: 2,
            tokens: vec!["09:00".to_string(), "8:00".to_string()],
        };
        assert_eq!(err.offending_tokens().as_deref(), Some("[09:00 8:00]"));
        assert_eq!(err.to_string(), "malformed line 2: [09:00 8:00]");
    }

    #[test]
    fn test_empty_line_renders_empty_brackets() {
        let err = parse("\n09:00 19:00\n10\n").unwrap_err();
        assert_eq!(err.offending_tokens().as_deref(), Some("[]"));
    }
}
