use serde::Serialize;

use crate::domain::event::EventStatus;

/// Status pill shown in the event header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    /// Translation key of the label
    pub label_key:   &'static str,
    pub style_class: &'static str
}

impl StatusBadge {
    const CANCELLED: Self = Self { label_key: "badge_cancelled", style_class: "badge--cancelled" };
    const CLOSED: Self = Self { label_key: "badge_closed", style_class: "badge--closed" };
    const FULL: Self = Self { label_key: "badge_full", style_class: "badge--full" };
    const OPEN: Self = Self { label_key: "badge_open", style_class: "badge--open" };

    pub fn for_status(status: &EventStatus, is_full: bool) -> Self {
        match status {
            EventStatus::Cancelled => Self::CANCELLED,
            EventStatus::Closed | EventStatus::Other(_) => Self::CLOSED,
            EventStatus::Full => Self::FULL,
            EventStatus::Open if is_full => Self::FULL,
            EventStatus::Open => Self::OPEN
        }
    }
}
