//! Registration payload submitted from the event page and the stored record

use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::{SignupError, ValidationIssue};

/// Largest party a single registration may bring
pub const MAX_PARTY_SIZE: u32 = 50;

/// Form payload of a signup submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub name:              String,
    pub email:             String,
    pub phone:             Option<String>,
    pub company:           Option<String>,
    pub tax_id:            Option<String>,
    pub role:              Option<String>,
    /// Seats taken by this registration, including the registrant
    pub party_size:        u32,
    pub privacy_consent:   bool,
    pub marketing_consent: bool
}

impl RegistrationRequest {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name:              name.into(),
            email:             email.into(),
            phone:             None,
            company:           None,
            tax_id:            None,
            role:              None,
            party_size:        1,
            privacy_consent:   true,
            marketing_consent: false
        }
    }

    pub fn with_party_size(mut self, party_size: u32) -> Self {
        self.party_size = party_size;
        self
    }

    /// Trim free-text fields and drop empty optionals
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_ascii_lowercase();
        for field in [&mut self.phone, &mut self.company, &mut self.tax_id, &mut self.role] {
            *field = field.take().map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        }
        self
    }

    /// Check required fields, collecting every problem at once
    pub fn validate(&self) -> Result<(), SignupError> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(ValidationIssue::MissingName);
        }

        let email = self.email.trim();
        if email.is_empty() {
            issues.push(ValidationIssue::MissingEmail);
        } else if !is_plausible_email(email) {
            issues.push(ValidationIssue::InvalidEmail);
        }

        if !self.privacy_consent {
            issues.push(ValidationIssue::MissingPrivacyConsent);
        }

        if self.party_size == 0 || self.party_size > MAX_PARTY_SIZE {
            issues.push(ValidationIssue::InvalidPartySize);
        }

        if issues.is_empty() { Ok(()) } else { Err(SignupError::Validation(issues)) }
    }
}

fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !email.contains(char::is_whitespace)
                && domain.split('.').count() >= 2
                && domain.split('.').all(|label| !label.is_empty())
        }
        _ => false
    }
}

/// Whether a stored registration holds a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Confirmed,
    Waitlist
}

impl Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationStatus::Confirmed => f.write_str("confirmed"),
            RegistrationStatus::Waitlist => f.write_str("waitlist")
        }
    }
}

/// A registration as committed by a capacity service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id:         String,
    pub event_id:   String,
    pub status:     RegistrationStatus,
    pub request:    RegistrationRequest,
    pub created_at: DateTime<Utc>
}

impl Registration {
    pub fn new(
        event_id: impl Into<String>,
        request: RegistrationRequest,
        status: RegistrationStatus,
        created_at: DateTime<Utc>
    ) -> Self {
        Self { id: Uuid::new_v4().to_string(), event_id: event_id.into(), status, request, created_at }
    }

    pub fn seats(&self) -> u32 {
        self.request.party_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request_passes() {
        let request = RegistrationRequest::new("Ada Lovelace", "ada@example.org");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_all_issues_are_reported_together() {
        let mut request = RegistrationRequest::new("  ", "not-an-email").with_party_size(0);
        request.privacy_consent = false;

        match request.validate() {
            Err(SignupError::Validation(issues)) => {
                assert_eq!(issues, vec![
                    ValidationIssue::MissingName,
                    ValidationIssue::InvalidEmail,
                    ValidationIssue::MissingPrivacyConsent,
                    ValidationIssue::InvalidPartySize
                ]);
            }
            other => panic!("Expected validation error, got {:?}", other)
        }
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_plausible_email("a@b.co"));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email("@b.co"));
        assert!(!is_plausible_email("a@@b.co"));
        assert!(!is_plausible_email("a b@c.co"));
        assert!(!is_plausible_email("a@b..co"));
    }

    #[test]
    fn test_normalized_drops_blank_optionals() {
        let mut request = RegistrationRequest::new(" Ada ", " ADA@Example.org ");
        request.company = Some("   ".to_string());
        request.role = Some(" Speaker ".to_string());

        let request = request.normalized();
        assert_eq!(request.name, "Ada");
        assert_eq!(request.email, "ada@example.org");
        assert_eq!(request.company, None);
        assert_eq!(request.role.as_deref(), Some("Speaker"));
    }

    #[test]
    fn test_oversized_party_is_rejected() {
        let request = RegistrationRequest::new("Ada", "ada@example.org").with_party_size(MAX_PARTY_SIZE + 1);
        assert!(matches!(request.validate(), Err(SignupError::Validation(_))));
    }
}
