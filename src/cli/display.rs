//! Terminal rendering of views, registrations and errors

use tabled::{Table, Tabled, settings::Style};

use crate::{
    domain::{
        colleague::Colleague,
        error::{SignupError, ValidationIssue},
        registration::{MAX_PARTY_SIZE, Registration}
    },
    i18n::{Language, t_lang, t_params_lang},
    resolver::notice::{format_instant, render_notice},
    service::signup::SignupView,
    t_params
};

/// One line of the registrations table
#[derive(Debug, Tabled)]
struct RegistrationRow {
    #[tabled(rename = "ID")]
    id:         String,
    #[tabled(rename = "Name")]
    name:       String,
    #[tabled(rename = "Email")]
    email:      String,
    #[tabled(rename = "Seats")]
    seats:      u32,
    #[tabled(rename = "Status")]
    status:     String,
    #[tabled(rename = "Created At")]
    created_at: String
}

impl From<&Registration> for RegistrationRow {
    fn from(registration: &Registration) -> Self {
        Self {
            id:         registration.id.clone(),
            name:       registration.request.name.clone(),
            email:      registration.request.email.clone(),
            seats:      registration.seats(),
            status:     registration.status.to_string(),
            created_at: registration.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
        }
    }
}

/// Header, dates, badge, labels, notice, colleagues and the decision table of a view
pub fn render_view(view: &SignupView, lang: Language) -> String {
    let config = &view.config;
    let title = view.title.as_deref().unwrap_or(&config.id);
    let badge = t_lang(view.badge.label_key, lang);
    let notice = render_notice(&view.decision, config, lang);

    let mut lines = vec![t_params!("cli_event_header", &[title, config.status.as_str()], lang)];
    match (config.event_starts_at, config.event_ends_at) {
        (Some(starts_at), Some(ends_at)) => lines.push(t_params!(
            "cli_event_dates",
            &[format_instant(starts_at).as_str(), format_instant(ends_at).as_str()],
            lang
        )),
        (Some(starts_at), None) => lines.push(t_params!("cli_event_starts", &[&format_instant(starts_at)], lang)),
        _ => {}
    }

    lines.push(t_params!("cli_status_badge", &[&badge], lang));
    lines.push(t_params!("cli_availability", &[&view.labels.availability.render(lang)], lang));
    if let Some(remaining) = view.snapshot.remaining(config.capacity) {
        lines.push(t_params!("cli_seats_left", &[&remaining.to_string()], lang));
    }
    lines.push(t_params!("cli_waitlist", &[&view.labels.waitlist.render(lang)], lang));
    lines.push(t_params!("cli_notice", &[&notice], lang));

    if !view.colleagues.is_empty() {
        lines.push(t_params!("cli_colleagues", &[&render_colleagues(&view.colleagues)], lang));
    }

    let mut decision_table = Table::new([view.decision]);
    decision_table.with(Style::rounded());
    lines.push(decision_table.to_string());

    lines.join("\n")
}

fn render_colleagues(colleagues: &[Colleague]) -> String {
    colleagues
        .iter()
        .map(|colleague| match &colleague.role {
            Some(role) => format!("{} ({})", colleague.name, role),
            None => colleague.name.clone()
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_registrations(registrations: &[Registration], lang: Language) -> String {
    if registrations.is_empty() {
        return t_lang("cli_no_registrations", lang);
    }

    let mut table = Table::new(registrations.iter().map(RegistrationRow::from));
    table.with(Style::rounded());
    table.to_string()
}

pub fn render_validation_issue(issue: ValidationIssue, lang: Language) -> String {
    match issue {
        ValidationIssue::InvalidPartySize => t_params_lang(issue.key(), &[&MAX_PARTY_SIZE.to_string()], lang),
        other => t_lang(other.key(), lang)
    }
}

/// Message printed when a command fails
pub fn render_error(error: &SignupError, lang: Language) -> String {
    match error {
        SignupError::Validation(issues) => issues
            .iter()
            .map(|issue| format!("- {}", render_validation_issue(*issue, lang)))
            .collect::<Vec<_>>()
            .join("\n"),
        SignupError::Generic(message) => message.clone(),
        other => t_params!("error_command_failed", &[&other.to_string()], lang)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::domain::{
        capacity::CapacitySnapshot,
        event::{EventConfig, EventStatus},
        registration::{RegistrationRequest, RegistrationStatus}
    };

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z").unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_full_event_view() {
        let config = EventConfig::new("meetup").with_status(EventStatus::Open).with_capacity(20);
        let view = SignupView::resolve(config, CapacitySnapshot::new(20, 3), now())
            .with_title(Some("Rust meetup".to_string()));

        let output = render_view(&view, Language::English);
        assert!(output.contains("Event Rust meetup (open)"));
        assert!(output.contains("Status: Full"));
        assert!(output.contains("Availability: 20 / 20"));
        assert!(output.contains("Seats left: 0"));
        assert!(output.contains("Waitlist: 3 people on the waitlist"));
        assert!(output.contains("waitlist_form"));
        assert!(!output.contains("When:"));
        assert!(!output.contains("With:"));
    }

    #[test]
    fn test_view_shows_dates_seats_left_and_colleagues() {
        let starts_at = DateTime::parse_from_rfc3339("2025-06-20T18:00:00+02:00").unwrap();
        let ends_at = DateTime::parse_from_rfc3339("2025-06-20T21:30:00+02:00").unwrap();
        let config = EventConfig::new("meetup").with_capacity(30).with_event_start(starts_at).with_event_end(ends_at);
        let view = SignupView::resolve(config, CapacitySnapshot::new(12, 0), now()).with_colleagues(vec![
            Colleague { name: "Grace Hopper".to_string(), role: Some("Host".to_string()), email: None, photo_url: None },
            Colleague { name: "Alan Turing".to_string(), role: None, email: None, photo_url: None },
        ]);

        let output = render_view(&view, Language::English);
        assert!(output.contains("When: 2025-06-20 18:00 to 2025-06-20 21:30"));
        assert!(output.contains("Seats left: 18"));
        assert!(output.contains("With: Grace Hopper (Host), Alan Turing"));

        let spanish = render_view(&view, Language::Spanish);
        assert!(spanish.contains("Plazas libres: 18"));
    }

    #[test]
    fn test_unlimited_event_has_no_seats_left_line() {
        let starts_at = DateTime::parse_from_rfc3339("2025-06-20T18:00:00+02:00").unwrap();
        let config = EventConfig::new("open-day").with_event_start(starts_at);
        let view = SignupView::resolve(config, CapacitySnapshot::new(500, 0), now());

        let output = render_view(&view, Language::English);
        assert!(output.contains("Starts: 2025-06-20 18:00"));
        assert!(!output.contains("Seats left"));
    }

    #[test]
    fn test_registrations_table() {
        assert_eq!(render_registrations(&[], Language::English), "No registrations yet.");

        let request = RegistrationRequest::new("Ada", "ada@example.org").with_party_size(2);
        let registration = Registration::new("meetup", request, RegistrationStatus::Waitlist, now());
        let output = render_registrations(&[registration], Language::English);

        assert!(output.contains("Ada"));
        assert!(output.contains("waitlist"));
        assert!(output.contains("Seats"));
    }

    #[test]
    fn test_validation_errors_are_localised() {
        let error = SignupError::Validation(vec![ValidationIssue::MissingName, ValidationIssue::InvalidPartySize]);

        assert_eq!(
            render_error(&error, Language::English),
            "- Please enter your name.\n- Party size must be between 1 and 50."
        );
    }
}
