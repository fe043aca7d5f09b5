//! Registration window & capacity resolution
//!
//! Decides what the signup area of an event page shows, given the event's
//! configuration, a capacity snapshot and the current instant. The decision is
//! a pure function of those three inputs: no clock reads, no storage access.
//!
//! Rules are checked in a fixed priority order and the first match wins:
//!
//! 1. `cancelled` status
//! 2. `closed` status
//! 3. waitlist, when the event is full but otherwise inside its window
//! 4. any other non-open status
//! 5. before the booking window opens
//! 6. after the booking window closes (explicit close or event day)
//! 7. full
//! 8. open

pub mod labels;
pub mod notice;

use chrono::{DateTime, Utc};

use crate::domain::{
    capacity::CapacitySnapshot,
    decision::{DecisionReason, RegistrationDecision},
    event::{EventConfig, EventStatus},
    window::BookingWindow
};

/// Resolver for the signup state of an event page
pub struct RegistrationWindowResolver;

impl RegistrationWindowResolver {
    /// Resolve including the module switch
    ///
    /// Events whose signups run through an external system are always
    /// `external_only`, whatever their status, window or capacity.
    pub fn resolve_with_module(
        config: &EventConfig,
        snapshot: &CapacitySnapshot,
        now: DateTime<Utc>
    ) -> RegistrationDecision {
        if !config.module_enabled {
            return RegistrationDecision::EXTERNAL_ONLY;
        }
        Self::resolve(config, snapshot, now)
    }

    /// Resolve the decision for an event handled by the built-in module
    pub fn resolve(config: &EventConfig, snapshot: &CapacitySnapshot, now: DateTime<Utc>) -> RegistrationDecision {
        match config.status {
            EventStatus::Cancelled => return RegistrationDecision::closed(DecisionReason::Cancelled),
            EventStatus::Closed => return RegistrationDecision::closed(DecisionReason::ClosedByStatus),
            _ => {}
        }

        let window = BookingWindow::from_config(config);
        let before_window = window.is_before(now);
        let passed_edge = window.passed_edge(now);
        let is_full = snapshot.is_full(config.capacity);

        let waitlist_mode = config.status.accepts_signups() && !before_window && passed_edge.is_none() && is_full;

        if waitlist_mode {
            RegistrationDecision::WAITLIST
        } else if !config.status.accepts_signups() {
            RegistrationDecision::closed(DecisionReason::ClosedByStatus)
        } else if before_window {
            RegistrationDecision::closed(DecisionReason::BeforeWindow)
        } else if let Some(edge) = passed_edge {
            RegistrationDecision::closed(edge.reason())
        } else if is_full {
            // Unreachable while the waitlist branch above covers every full, in-window event
            RegistrationDecision::closed(DecisionReason::Full)
        } else {
            RegistrationDecision::OPEN
        }
    }
}
