//! Localised texts for labels, notices and CLI output
//!
//! Translations are embedded YAML maps, one per language. Lookups fall back
//! to English and finally to the key itself, so a missing translation never
//! fails a render.

pub mod macros;

use std::{
    collections::HashMap,
    fmt::{self, Display},
    sync::OnceLock
};

use serde_yaml::Value;

pub const EN_YAML: &str = include_str!("../../config/i18n/en.yaml");
pub const ES_YAML: &str = include_str!("../../config/i18n/es.yaml");

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Spanish
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Spanish];

    /// Get the file code for this language
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es"
        }
    }

    /// Parse language from code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::English),
            "es" => Some(Language::Spanish),
            _ => None
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Text mapping type
pub type TextMap = HashMap<String, String>;

static TEXT_CACHE: OnceLock<HashMap<Language, TextMap>> = OnceLock::new();
static CURRENT_LANGUAGE: OnceLock<Language> = OnceLock::new();

fn parse_text_map(content: &str) -> TextMap {
    match serde_yaml::from_str::<HashMap<String, Value>>(content) {
        Ok(yaml_map) => yaml_map
            .into_iter()
            .filter_map(|(k, v)| if let Value::String(s) = v { Some((k, s)) } else { None })
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse embedded translations");
            HashMap::new()
        }
    }
}

fn get_text_cache() -> &'static HashMap<Language, TextMap> {
    TEXT_CACHE.get_or_init(|| {
        let mut cache = HashMap::new();
        cache.insert(Language::English, parse_text_map(EN_YAML));
        cache.insert(Language::Spanish, parse_text_map(ES_YAML));
        cache
    })
}

/// Pick the process-wide language; only the first call has an effect
pub fn init(lang: Language) -> Language {
    *CURRENT_LANGUAGE.get_or_init(|| lang)
}

/// The process-wide language, English until [`init`] runs
pub fn current_language() -> Language {
    CURRENT_LANGUAGE.get().copied().unwrap_or_default()
}

/// Get text for a key in a specific language
pub fn t_lang(key: &str, lang: Language) -> String {
    let cache = get_text_cache();

    if let Some(text) = cache.get(&lang).and_then(|texts| texts.get(key)) {
        return text.clone();
    }

    if lang != Language::English
        && let Some(text) = cache.get(&Language::English).and_then(|texts| texts.get(key))
    {
        return text.clone();
    }

    key.to_string()
}

/// Get text for a key in the current language
pub fn t(key: &str) -> String {
    t_lang(key, current_language())
}

/// Get parameterized text in a specific language, replacing `{0}`, `{1}`, ...
pub fn t_params_lang(key: &str, params: &[&str], lang: Language) -> String {
    let mut result = t_lang(key, lang);
    for (i, param) in params.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), param);
    }
    result
}

/// Get parameterized text in the current language
pub fn t_params(key: &str, params: &[&str]) -> String {
    t_params_lang(key, params, current_language())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_english_key_is_translated() {
        let cache = get_text_cache();
        let en = &cache[&Language::English];
        let es = &cache[&Language::Spanish];

        assert!(!en.is_empty());
        let missing: Vec<_> = en.keys().filter(|key| !es.contains_key(*key)).collect();
        assert!(missing.is_empty(), "missing Spanish keys: {:?}", missing);
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        assert_eq!(t_lang("definitely_not_a_key", Language::Spanish), "definitely_not_a_key");
    }

    #[test]
    fn test_params_are_substituted_in_order() {
        assert_eq!(t_params_lang("label_waitlist_other", &["4"], Language::English), "4 people on the waitlist");
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code(" ES "), Some(Language::Spanish));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::Spanish.to_string(), "es");
    }
}
