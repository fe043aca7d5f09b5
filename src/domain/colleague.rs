//! Speakers and hosts attached to an event
//!
//! Events reference colleagues either by index into the global roster or, in
//! older content, as inline records. Both shapes normalise to [`Colleague`].

use serde::{Deserialize, Serialize};
use tracing::{Level, event};

use crate::domain::constant::colleagues;

/// A colleague ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colleague {
    pub name:      String,
    pub role:      Option<String>,
    pub email:     Option<String>,
    pub photo_url: Option<String>
}

/// Colleague reference as stored in event metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColleagueRef {
    /// Index into the global roster
    Roster { index: usize },
    /// Deprecated inline record
    Legacy {
        name:  String,
        #[serde(default)]
        role:  Option<String>,
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        photo: Option<String>
    }
}

/// Resolve references against `roster`, skipping dangling indices and nameless entries
pub fn normalize_colleagues(refs: &[ColleagueRef], roster: &[Colleague]) -> Vec<Colleague> {
    refs.iter()
        .filter_map(|reference| match reference {
            ColleagueRef::Roster { index } => {
                let found = roster.get(*index).cloned();
                if found.is_none() {
                    event!(Level::WARN, event = colleagues::ROSTER_INDEX_MISSING,
                           index = *index, roster_len = roster.len());
                }
                found
            }
            ColleagueRef::Legacy { name, role, email, photo } => {
                event!(Level::DEBUG, event = colleagues::LEGACY_RECORD_USED, name = %name);
                Some(Colleague {
                    name:      name.clone(),
                    role:      role.clone(),
                    email:     email.clone(),
                    photo_url: photo.clone()
                })
            }
        })
        .map(|mut colleague| {
            colleague.name = colleague.name.trim().to_string();
            colleague
        })
        .filter(|colleague| !colleague.name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Colleague> {
        vec![
            Colleague { name: "Grace Hopper".to_string(), role: Some("Host".to_string()), email: None, photo_url: None },
            Colleague { name: "Alan Turing".to_string(), role: None, email: None, photo_url: None },
        ]
    }

    #[test]
    fn test_mixed_shapes_normalize_in_order() {
        let refs = vec![
            ColleagueRef::Roster { index: 1 },
            ColleagueRef::Legacy {
                name:  "Ada Lovelace".to_string(),
                role:  Some("Speaker".to_string()),
                email: None,
                photo: Some("https://example.org/ada.png".to_string())
            },
            ColleagueRef::Roster { index: 0 },
        ];

        let colleagues = normalize_colleagues(&refs, &roster());
        let names: Vec<_> = colleagues.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alan Turing", "Ada Lovelace", "Grace Hopper"]);
        assert_eq!(colleagues[1].photo_url.as_deref(), Some("https://example.org/ada.png"));
    }

    #[test]
    fn test_dangling_index_and_blank_names_are_skipped() {
        let refs = vec![
            ColleagueRef::Roster { index: 7 },
            ColleagueRef::Legacy { name: "  ".to_string(), role: None, email: None, photo: None },
        ];
        assert!(normalize_colleagues(&refs, &roster()).is_empty());
    }

    #[test]
    fn test_both_shapes_deserialize_from_yaml() {
        let yaml = "- index: 0\n- name: Ada Lovelace\n  role: Speaker\n";
        let refs: Vec<ColleagueRef> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(refs[0], ColleagueRef::Roster { index: 0 });
        assert!(matches!(&refs[1], ColleagueRef::Legacy { name, .. } if name == "Ada Lovelace"));
    }
}
