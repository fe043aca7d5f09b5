//! Event configuration as seen by the signup engine
//!
//! An [`EventConfig`] is built once per request from the event's metadata and
//! never changes while a decision is being computed.

use std::fmt::{self, Display};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Operator-set registration status of an event
///
/// Values other than the four known ones are kept verbatim so they can be
/// reported, and are treated as closed by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventStatus {
    #[default]
    Open,
    Closed,
    Cancelled,
    Full,
    Other(String)
}

impl EventStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EventStatus::Open => "open",
            EventStatus::Closed => "closed",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Full => "full",
            EventStatus::Other(raw) => raw
        }
    }

    /// `open` and `full` are the only statuses that may still show a form
    pub fn accepts_signups(&self) -> bool {
        matches!(self, EventStatus::Open | EventStatus::Full)
    }
}

impl From<&str> for EventStatus {
    fn from(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" | "open" => EventStatus::Open,
            "closed" => EventStatus::Closed,
            "cancelled" | "canceled" => EventStatus::Cancelled,
            "full" => EventStatus::Full,
            _ => EventStatus::Other(normalized)
        }
    }
}

impl From<String> for EventStatus {
    fn from(raw: String) -> Self {
        EventStatus::from(raw.as_str())
    }
}

impl From<EventStatus> for String {
    fn from(status: EventStatus) -> Self {
        status.as_str().to_string()
    }
}

impl Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed event configuration consumed by the resolver
///
/// Instants keep the offset they were recorded in; the event start offset is
/// what defines the event's local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventConfig {
    pub id:                String,
    pub status:            EventStatus,
    pub booking_opens_at:  Option<DateTime<FixedOffset>>,
    pub booking_closes_at: Option<DateTime<FixedOffset>>,
    pub event_starts_at:   Option<DateTime<FixedOffset>>,
    pub event_ends_at:     Option<DateTime<FixedOffset>>,
    /// Number of seats, `0` means unlimited
    pub capacity:          u32,
    /// `false` when signups are handled by an external system
    pub module_enabled:    bool
}

impl EventConfig {
    /// An open, unlimited event with no window and the built-in module enabled
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id:                id.into(),
            status:            EventStatus::Open,
            booking_opens_at:  None,
            booking_closes_at: None,
            event_starts_at:   None,
            event_ends_at:     None,
            capacity:          0,
            module_enabled:    true
        }
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_booking_window(
        mut self,
        opens_at: Option<DateTime<FixedOffset>>,
        closes_at: Option<DateTime<FixedOffset>>
    ) -> Self {
        self.booking_opens_at = opens_at;
        self.booking_closes_at = closes_at;
        self
    }

    pub fn with_event_start(mut self, starts_at: DateTime<FixedOffset>) -> Self {
        self.event_starts_at = Some(starts_at);
        self
    }

    pub fn with_event_end(mut self, ends_at: DateTime<FixedOffset>) -> Self {
        self.event_ends_at = Some(ends_at);
        self
    }

    pub fn with_module_enabled(mut self, enabled: bool) -> Self {
        self.module_enabled = enabled;
        self
    }
}
