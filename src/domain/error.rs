use std::fmt;

use thiserror::Error;

use crate::domain::decision::RegistrationDecision;

/// Common error types for the signup system
#[derive(Error, Debug, Clone)]
pub enum SignupError {
    /// Registration payload failed validation
    #[error("invalid registration: {}", format_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// Event metadata or settings could not be interpreted
    #[error("{0}")]
    Configuration(String),

    /// The last slot was taken between the snapshot read and the write
    #[error("capacity changed while registering for event {event_id}")]
    CapacityRace { event_id: String },

    /// The form is not shown for the current decision
    #[error("registration is not accepted: {0}")]
    RegistrationClosed(RegistrationDecision),

    /// Unknown event identifier
    #[error("event not found: {0}")]
    NotFound(String),

    /// Storage backend errors
    #[error("{0}")]
    Storage(String),

    /// Serialization/deserialization errors
    #[error("{0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Generic(String)
}

/// A single problem found while validating a registration request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingName,
    MissingEmail,
    InvalidEmail,
    MissingPrivacyConsent,
    InvalidPartySize
}

impl ValidationIssue {
    /// Translation key used when showing this issue next to the form
    pub fn key(&self) -> &'static str {
        match self {
            ValidationIssue::MissingName => "validation_missing_name",
            ValidationIssue::MissingEmail => "validation_missing_email",
            ValidationIssue::InvalidEmail => "validation_invalid_email",
            ValidationIssue::MissingPrivacyConsent => "validation_missing_privacy_consent",
            ValidationIssue::InvalidPartySize => "validation_invalid_party_size"
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues.iter().map(ValidationIssue::key).collect::<Vec<_>>().join(", ")
}

impl SignupError {
    pub fn invalid_field(field: &str, value: impl fmt::Display) -> Self {
        SignupError::Configuration(format!("invalid value for '{}': {}", field, value))
    }

    pub fn storage_failed(action: &str, error: impl fmt::Display) -> Self {
        SignupError::Storage(format!("failed to {}: {}", action, error))
    }
}

/// Convert from anyhow::Error
impl From<anyhow::Error> for SignupError {
    fn from(err: anyhow::Error) -> Self {
        SignupError::Generic(format!("{:#}", err))
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for SignupError {
    fn from(err: std::io::Error) -> Self {
        SignupError::Storage(err.to_string())
    }
}

/// Convert from serde_yaml::Error
impl From<serde_yaml::Error> for SignupError {
    fn from(err: serde_yaml::Error) -> Self {
        SignupError::Serialization(err.to_string())
    }
}

/// Convert from serde_json::Error
impl From<serde_json::Error> for SignupError {
    fn from(err: serde_json::Error) -> Self {
        SignupError::Serialization(err.to_string())
    }
}
