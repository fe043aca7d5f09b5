//! Raw event metadata and its normalisation into [`EventConfig`]
//!
//! Metadata arrives the way a CMS stores it: loosely typed strings for
//! statuses, dates and numbers. Everything is parsed here, at the boundary,
//! so the resolver only ever sees typed values.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

use crate::domain::{
    colleague::ColleagueRef,
    constant::metadata,
    error::SignupError,
    event::{EventConfig, EventStatus}
};

const NAIVE_DATETIME_FORMATS: [&str; 4] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// A loosely typed metadata value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaScalar {
    Bool(bool),
    Integer(i64),
    Text(String)
}

/// Event metadata exactly as stored alongside the event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    pub id:             String,
    #[serde(default)]
    pub title:          Option<String>,
    #[serde(default)]
    pub status:         Option<String>,
    #[serde(default)]
    pub start:          Option<String>,
    #[serde(default)]
    pub end:            Option<String>,
    #[serde(default)]
    pub booking_open:   Option<String>,
    #[serde(default)]
    pub booking_close:  Option<String>,
    #[serde(default)]
    pub capacity:       Option<MetaScalar>,
    #[serde(default)]
    pub module_enabled: Option<MetaScalar>,
    #[serde(default)]
    pub colleagues:     Vec<ColleagueRef>
}

impl EventMetadata {
    /// Build the typed configuration
    ///
    /// Naive date/time strings are read in `site_offset`. `module_default`
    /// applies when the event carries no module flag.
    pub fn to_config(&self, site_offset: FixedOffset, module_default: bool) -> Result<EventConfig, SignupError> {
        let status = EventStatus::from(self.status.as_deref().unwrap_or_default());
        if let EventStatus::Other(raw) = &status {
            event!(Level::WARN, event = metadata::UNKNOWN_STATUS, event_id = %self.id, status = %raw);
        }

        let module_enabled = match &self.module_enabled {
            Some(flag) => parse_flag("module_enabled", flag)?,
            None => module_default
        };

        Ok(EventConfig {
            id:                self.id.clone(),
            status,
            booking_opens_at:  parse_instant("booking_open", self.booking_open.as_deref(), site_offset)?,
            booking_closes_at: parse_instant("booking_close", self.booking_close.as_deref(), site_offset)?,
            event_starts_at:   parse_instant("start", self.start.as_deref(), site_offset)?,
            event_ends_at:     parse_instant("end", self.end.as_deref(), site_offset)?,
            capacity:          parse_capacity(self.capacity.as_ref())?,
            module_enabled
        })
    }
}

/// Parse a stored date/time; empty or missing values are absent
pub fn parse_instant(
    field: &str,
    raw: Option<&str>,
    site_offset: FixedOffset
) -> Result<Option<DateTime<FixedOffset>>, SignupError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw
    };

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(instant));
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().map(|date| date.and_time(NaiveTime::MIN)))
        .ok_or_else(|| SignupError::invalid_field(field, raw))?;

    site_offset.from_local_datetime(&naive).single().map(Some).ok_or_else(|| SignupError::invalid_field(field, raw))
}

fn parse_capacity(raw: Option<&MetaScalar>) -> Result<u32, SignupError> {
    match raw {
        None => Ok(0),
        Some(MetaScalar::Integer(n)) => u32::try_from(*n).map_err(|_| SignupError::invalid_field("capacity", n)),
        Some(MetaScalar::Text(text)) if text.trim().is_empty() => Ok(0),
        Some(MetaScalar::Text(text)) => {
            text.trim().parse::<u32>().map_err(|_| SignupError::invalid_field("capacity", text))
        }
        Some(MetaScalar::Bool(flag)) => Err(SignupError::invalid_field("capacity", flag))
    }
}

fn parse_flag(field: &str, raw: &MetaScalar) -> Result<bool, SignupError> {
    match raw {
        MetaScalar::Bool(flag) => Ok(*flag),
        MetaScalar::Integer(0) => Ok(false),
        MetaScalar::Integer(1) => Ok(true),
        MetaScalar::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(SignupError::invalid_field(field, text))
        },
        MetaScalar::Integer(other) => Err(SignupError::invalid_field(field, other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn madrid_summer() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    #[test]
    fn test_accepted_date_formats() {
        let offset = madrid_summer();
        let expected = DateTime::parse_from_rfc3339("2025-06-10T09:30:00+02:00").unwrap();

        for raw in ["2025-06-10 09:30", "2025-06-10 09:30:00", "2025-06-10T09:30", "2025-06-10T07:30:00Z"] {
            assert_eq!(parse_instant("start", Some(raw), offset).unwrap(), Some(expected), "format {}", raw);
        }

        let midnight = DateTime::parse_from_rfc3339("2025-06-10T00:00:00+02:00").unwrap();
        assert_eq!(parse_instant("start", Some("2025-06-10"), offset).unwrap(), Some(midnight));
    }

    #[test]
    fn test_empty_dates_are_absent_and_garbage_is_rejected() {
        assert_eq!(parse_instant("start", None, madrid_summer()).unwrap(), None);
        assert_eq!(parse_instant("start", Some("  "), madrid_summer()).unwrap(), None);
        assert!(matches!(
            parse_instant("start", Some("next tuesday"), madrid_summer()),
            Err(SignupError::Configuration(_))
        ));
    }

    #[test]
    fn test_capacity_parsing() {
        assert_eq!(parse_capacity(None).unwrap(), 0);
        assert_eq!(parse_capacity(Some(&MetaScalar::Text("".to_string()))).unwrap(), 0);
        assert_eq!(parse_capacity(Some(&MetaScalar::Text(" 40 ".to_string()))).unwrap(), 40);
        assert_eq!(parse_capacity(Some(&MetaScalar::Integer(12))).unwrap(), 12);
        assert!(parse_capacity(Some(&MetaScalar::Integer(-1))).is_err());
        assert!(parse_capacity(Some(&MetaScalar::Text("many".to_string()))).is_err());
    }

    #[test]
    fn test_yaml_metadata_to_config() {
        let yaml = r#"
id: workshop-42
title: Rust for CMS developers
status: Open
start: "2025-06-10 09:30"
booking_close: ""
capacity: "20"
module_enabled: "1"
colleagues:
  - index: 0
"#;
        let meta: EventMetadata = serde_yaml::from_str(yaml).unwrap();
        let config = meta.to_config(madrid_summer(), false).unwrap();

        assert_eq!(config.id, "workshop-42");
        assert_eq!(config.status, EventStatus::Open);
        assert_eq!(config.capacity, 20);
        assert!(config.module_enabled);
        assert_eq!(config.booking_closes_at, None);
        assert_eq!(config.event_starts_at, Some(DateTime::parse_from_rfc3339("2025-06-10T09:30:00+02:00").unwrap()));
        assert_eq!(meta.colleagues.len(), 1);
    }

    #[test]
    fn test_module_flag_falls_back_to_default() {
        let meta = EventMetadata { id: "e".to_string(), ..Default::default() };
        assert!(!meta.to_config(madrid_summer(), false).unwrap().module_enabled);
        assert!(meta.to_config(madrid_summer(), true).unwrap().module_enabled);

        let meta = EventMetadata { module_enabled: Some(MetaScalar::Bool(false)), ..meta };
        assert!(!meta.to_config(madrid_summer(), true).unwrap().module_enabled);
    }
}
