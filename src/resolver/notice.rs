use chrono::{DateTime, FixedOffset};

use crate::{
    domain::{
        decision::{DecisionReason, RegistrationDecision, RegistrationMode},
        event::EventConfig
    },
    i18n::Language,
    t, t_params
};

const NOTICE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Localised notice for a decision
///
/// Window notices mention the relevant edge, formatted in the offset the edge
/// was configured in.
pub fn render_notice(decision: &RegistrationDecision, config: &EventConfig, lang: Language) -> String {
    match (decision.mode, decision.reason) {
        (RegistrationMode::ExternalOnly, _) => t!("notice_external", lang),
        (RegistrationMode::OpenForm, _) => t!("notice_open", lang),
        (RegistrationMode::WaitlistForm, _) => t!("notice_waitlist", lang),
        (RegistrationMode::ClosedNotice, DecisionReason::Cancelled) => t!("notice_cancelled", lang),
        (RegistrationMode::ClosedNotice, DecisionReason::Full) => t!("notice_full", lang),
        (RegistrationMode::ClosedNotice, DecisionReason::BeforeWindow) => match config.booking_opens_at {
            Some(opens_at) => t_params!("notice_before_window", &[&format_instant(opens_at)], lang),
            None => t!("notice_before_window_unknown", lang)
        },
        (RegistrationMode::ClosedNotice, DecisionReason::AfterWindowClosedate) => match config.booking_closes_at {
            Some(closes_at) => t_params!("notice_after_closedate", &[&format_instant(closes_at)], lang),
            None => t!("notice_closed", lang)
        },
        (RegistrationMode::ClosedNotice, DecisionReason::AfterWindowEventday) => t!("notice_after_eventday", lang),
        (RegistrationMode::ClosedNotice, DecisionReason::ClosedByStatus | DecisionReason::None) => {
            t!("notice_closed", lang)
        }
    }
}

/// Date and time as shown to visitors, in the offset the instant carries
pub fn format_instant(at: DateTime<FixedOffset>) -> String {
    at.format(NOTICE_DATE_FORMAT).to_string()
}
