//! Client model
//!
//! A client is present in the venue from arrival until departure or
//! eviction. Its status mirrors the last event kind applied to it.

use serde::{Deserialize, Serialize};

/// Status of a client currently in the venue
///
/// The numeric codes are the event kinds that put the client in this status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    /// Arrived, not seated and not waiting
    Arrived,
    /// Holding (or trying to hold) a table
    Seated,
    /// Waiting in the queue for a free table
    Queued,
}

impl ClientStatus {
    /// Numeric status code (1 = arrived, 2 = seated, 3 = queued)
    pub fn code(&self) -> u32 {
        match self {
            ClientStatus::Arrived => 1,
            ClientStatus::Seated => 2,
            ClientStatus::Queued => 3,
        }
    }
}

/// A client present in the venue
///
/// # Example
/// ```
/// use club_simulator_core::models::{Client, ClientStatus};
///
/// let client = Client::new("alice".to_string());
/// assert_eq!(client.username(), "alice");
/// assert_eq!(client.status(), ClientStatus::Arrived);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    username: String,
    status: ClientStatus,
}

impl Client {
    /// Create a freshly arrived client
    pub fn new(username: String) -> Self {
        Self {
            username,
            status: ClientStatus::Arrived,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn status(&self) -> ClientStatus {
        self.status
    }

    pub fn set_status(&mut self, status: ClientStatus) {
        self.status = status;
    }

    pub fn is_queued(&self) -> bool {
        self.status == ClientStatus::Queued
    }
}

/// Check that a username only uses `a-z`, `0-9`, `-` and `_`
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
}
