//! Booking window edges
//!
//! The window has two independent, optional edges. When no explicit close is
//! configured the window closes at local midnight of the event's start day, so
//! a live event stops taking signups without any operator setup.

use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Utc};

use crate::domain::{decision::DecisionReason, event::EventConfig};

/// Which edge closed the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseEdge {
    /// Explicit booking close instant
    Closedate,
    /// Implicit close at the start of the event's calendar day
    Eventday
}

impl CloseEdge {
    pub fn reason(&self) -> DecisionReason {
        match self {
            CloseEdge::Closedate => DecisionReason::AfterWindowClosedate,
            CloseEdge::Eventday => DecisionReason::AfterWindowEventday
        }
    }
}

/// Resolved booking window of one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    opens_at: Option<DateTime<Utc>>,
    close:    Option<(DateTime<Utc>, CloseEdge)>
}

impl BookingWindow {
    pub fn from_config(config: &EventConfig) -> Self {
        let opens_at = config.booking_opens_at.map(|at| at.with_timezone(&Utc));

        let close = match (config.booking_closes_at, config.event_starts_at) {
            (Some(closes_at), _) => Some((closes_at.with_timezone(&Utc), CloseEdge::Closedate)),
            (None, Some(starts_at)) => Some((start_of_calendar_day(starts_at).with_timezone(&Utc), CloseEdge::Eventday)),
            (None, None) => None
        };

        Self { opens_at, close }
    }

    pub fn opens_at(&self) -> Option<DateTime<Utc>> {
        self.opens_at
    }

    pub fn closes_at(&self) -> Option<DateTime<Utc>> {
        self.close.map(|(at, _)| at)
    }

    /// `now` is strictly earlier than the opening instant
    pub fn is_before(&self, now: DateTime<Utc>) -> bool {
        self.opens_at.is_some_and(|opens_at| now < opens_at)
    }

    /// The edge that has already passed, if any
    ///
    /// An explicit close is exclusive (`now > close`), the calendar-day close
    /// is inclusive (`now >= midnight`).
    pub fn passed_edge(&self, now: DateTime<Utc>) -> Option<CloseEdge> {
        match self.close {
            Some((closes_at, CloseEdge::Closedate)) if now > closes_at => Some(CloseEdge::Closedate),
            Some((midnight, CloseEdge::Eventday)) if now >= midnight => Some(CloseEdge::Eventday),
            _ => None
        }
    }
}

/// Local midnight of the day `at` falls on, in `at`'s own offset
pub fn start_of_calendar_day(at: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let midnight = at.date_naive().and_time(NaiveTime::MIN);
    at.offset().from_local_datetime(&midnight).earliest().unwrap_or(at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    fn utc(rfc3339: &str) -> DateTime<Utc> {
        at(rfc3339).with_timezone(&Utc)
    }

    #[test]
    fn test_calendar_day_uses_event_offset() {
        let start = at("2025-06-10T01:30:00+02:00");
        assert_eq!(start_of_calendar_day(start), at("2025-06-10T00:00:00+02:00"));

        // 22:00Z on the 9th is already the 10th in Madrid summer time
        assert_eq!(utc("2025-06-09T22:00:00Z"), start_of_calendar_day(start).with_timezone(&Utc));
    }

    #[test]
    fn test_explicit_close_wins_over_event_day() {
        let config = EventConfig::new("e1")
            .with_booking_window(None, Some(at("2025-06-12T18:00:00+00:00")))
            .with_event_start(at("2025-06-10T09:00:00+00:00"));
        let window = BookingWindow::from_config(&config);

        assert_eq!(window.passed_edge(utc("2025-06-11T10:00:00Z")), None);
        assert_eq!(window.passed_edge(utc("2025-06-12T18:00:00Z")), None);
        assert_eq!(window.passed_edge(utc("2025-06-12T18:00:01Z")), Some(CloseEdge::Closedate));
    }

    #[test]
    fn test_event_day_close_is_inclusive_at_midnight() {
        let config = EventConfig::new("e1").with_event_start(at("2025-06-10T19:00:00+00:00"));
        let window = BookingWindow::from_config(&config);

        assert_eq!(window.passed_edge(utc("2025-06-09T23:59:59Z")), None);
        assert_eq!(window.passed_edge(utc("2025-06-10T00:00:00Z")), Some(CloseEdge::Eventday));
        assert_eq!(window.closes_at(), Some(utc("2025-06-10T00:00:00Z")));
    }

    #[test]
    fn test_open_edge_is_exclusive() {
        let config = EventConfig::new("e1").with_booking_window(Some(at("2025-06-01T08:00:00+00:00")), None);
        let window = BookingWindow::from_config(&config);

        assert!(window.is_before(utc("2025-06-01T07:59:59Z")));
        assert!(!window.is_before(utc("2025-06-01T08:00:00Z")));
    }

    #[test]
    fn test_no_edges_means_always_inside() {
        let window = BookingWindow::from_config(&EventConfig::new("e1"));
        assert!(!window.is_before(utc("1970-01-01T00:00:00Z")));
        assert_eq!(window.passed_edge(utc("2999-01-01T00:00:00Z")), None);
        assert_eq!(window.opens_at(), None);
    }
}
