//! Outcome of resolving an event's signup state

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// What the event page shows in place of the signup form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationMode {
    /// A blocking notice, no form
    ClosedNotice,
    /// Form shown, submissions land on the waitlist
    WaitlistForm,
    /// Form shown, submissions take a seat
    OpenForm,
    /// Signups are handled by an external system
    ExternalOnly
}

impl RegistrationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationMode::ClosedNotice => "closed_notice",
            RegistrationMode::WaitlistForm => "waitlist_form",
            RegistrationMode::OpenForm => "open_form",
            RegistrationMode::ExternalOnly => "external_only"
        }
    }
}

impl Display for RegistrationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a decision was taken; exactly one applies per decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    Cancelled,
    ClosedByStatus,
    Full,
    BeforeWindow,
    AfterWindowClosedate,
    AfterWindowEventday,
    None
}

impl DecisionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionReason::Cancelled => "cancelled",
            DecisionReason::ClosedByStatus => "closed_by_status",
            DecisionReason::Full => "full",
            DecisionReason::BeforeWindow => "before_window",
            DecisionReason::AfterWindowClosedate => "after_window_closedate",
            DecisionReason::AfterWindowEventday => "after_window_eventday",
            DecisionReason::None => "none"
        }
    }
}

impl Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived signup state of an event page, never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tabled)]
pub struct RegistrationDecision {
    #[tabled(rename = "Mode")]
    pub mode:   RegistrationMode,
    #[tabled(rename = "Reason")]
    pub reason: DecisionReason
}

impl RegistrationDecision {
    pub const EXTERNAL_ONLY: Self = Self::new(RegistrationMode::ExternalOnly, DecisionReason::None);
    pub const OPEN: Self = Self::new(RegistrationMode::OpenForm, DecisionReason::None);
    pub const WAITLIST: Self = Self::new(RegistrationMode::WaitlistForm, DecisionReason::None);

    pub const fn new(mode: RegistrationMode, reason: DecisionReason) -> Self {
        Self { mode, reason }
    }

    pub const fn closed(reason: DecisionReason) -> Self {
        Self::new(RegistrationMode::ClosedNotice, reason)
    }

    /// Whether the signup form is rendered at all
    pub fn shows_form(&self) -> bool {
        matches!(self.mode, RegistrationMode::OpenForm | RegistrationMode::WaitlistForm)
    }

    pub fn is_waitlist(&self) -> bool {
        self.mode == RegistrationMode::WaitlistForm
    }

    /// Translation key of the notice shown alongside this decision
    pub fn notice_key(&self) -> &'static str {
        match (self.mode, self.reason) {
            (RegistrationMode::ExternalOnly, _) => "notice_external",
            (RegistrationMode::OpenForm, _) => "notice_open",
            (RegistrationMode::WaitlistForm, _) => "notice_waitlist",
            (RegistrationMode::ClosedNotice, DecisionReason::Cancelled) => "notice_cancelled",
            (RegistrationMode::ClosedNotice, DecisionReason::Full) => "notice_full",
            (RegistrationMode::ClosedNotice, DecisionReason::BeforeWindow) => "notice_before_window",
            (RegistrationMode::ClosedNotice, DecisionReason::AfterWindowClosedate) => "notice_after_closedate",
            (RegistrationMode::ClosedNotice, DecisionReason::AfterWindowEventday) => "notice_after_eventday",
            (RegistrationMode::ClosedNotice, DecisionReason::ClosedByStatus | DecisionReason::None) => {
                "notice_closed"
            }
        }
    }
}

impl Display for RegistrationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.mode, self.reason)
    }
}
