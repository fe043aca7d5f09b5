/// Compile-time translation key validation macro
///
/// Validates that translation keys exist in the embedded YAML files at compile
/// time, so a typo in a key fails the build instead of rendering the raw key.
///
/// Usage:
/// ```
/// use evreg::{i18n::Language, t};
///
/// let text = t!("label_unlimited");
/// let text = t!("label_unlimited", Language::Spanish);
/// ```
#[macro_export]
macro_rules! t {
    ($key:literal) => {{
        $crate::validate_key!($crate::i18n::EN_YAML, $crate::i18n::ES_YAML, $key);

        $crate::i18n::t($key)
    }};

    ($key:literal, $lang:expr) => {{
        $crate::validate_key!($crate::i18n::EN_YAML, $crate::i18n::ES_YAML, $key);

        $crate::i18n::t_lang($key, $lang)
    }};
}

/// Compile-time validated parameterized translation macro
#[macro_export]
macro_rules! t_params {
    ($key:literal, $params:expr) => {{
        $crate::validate_key!($crate::i18n::EN_YAML, $crate::i18n::ES_YAML, $key);

        $crate::i18n::t_params($key, $params)
    }};

    ($key:literal, $params:expr, $lang:expr) => {{
        $crate::validate_key!($crate::i18n::EN_YAML, $crate::i18n::ES_YAML, $key);

        $crate::i18n::t_params_lang($key, $params, $lang)
    }};
}

/// Macro for call-site validation - this will show errors at the call site
#[macro_export]
macro_rules! validate_key {
    ($en_yaml:expr, $es_yaml:expr, $key:literal) => {
        const _: () = {
            const PATTERN: [u8; 128] = $crate::i18n::macros::create_yaml_key_pattern($key);
            const EN_HAS_KEY: bool = $crate::i18n::macros::contains_pattern($en_yaml, &PATTERN);
            const ES_HAS_KEY: bool = $crate::i18n::macros::contains_pattern($es_yaml, &PATTERN);

            if !EN_HAS_KEY {
                panic!(concat!("Translation key '", $key, "' not found in en.yaml"));
            }
            if !ES_HAS_KEY {
                panic!(concat!("Translation key '", $key, "' not found in es.yaml"));
            }
        };
    };
}

/// Create a top-level YAML key pattern like `\nkey:` for searching
///
/// # Notes
///
/// Only top-level keys are found, and only when they are preceded by a line
/// break, which is why the translation files start with a comment line.
pub const fn create_yaml_key_pattern(key: &str) -> [u8; 128] {
    let mut pattern = [0u8; 128];
    let mut pos = 0;

    pattern[pos] = b'\n';
    pos += 1;

    let key_bytes = key.as_bytes();
    let mut i = 0;
    while i < key_bytes.len() && pos < 127 {
        pattern[pos] = key_bytes[i];
        pos += 1;
        i += 1;
    }

    if pos < 128 {
        pattern[pos] = b':';
    }

    pattern
}

/// Length of a pattern built by [`create_yaml_key_pattern`], up to its first zero byte
const fn pattern_len(pattern: &[u8; 128]) -> usize {
    let mut len = 0;
    while len < pattern.len() && pattern[len] != 0 {
        len += 1;
    }
    len
}

/// Whether `pattern` occurs in `haystack` starting at `offset`
///
/// The caller guarantees `offset + len <= haystack.len()`.
const fn matches_at(haystack: &[u8], offset: usize, pattern: &[u8; 128], len: usize) -> bool {
    let mut i = 0;
    while i < len {
        if haystack[offset + i] != pattern[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Search `text` for a zero-terminated key pattern
///
/// Usable in const context, so a missing translation key is a compile error.
///
/// # Notes
///
/// An empty pattern never matches, and neither does one longer than `text`.
pub const fn contains_pattern(text: &str, pattern: &[u8; 128]) -> bool {
    let haystack = text.as_bytes();
    let len = pattern_len(pattern);
    if len == 0 || len > haystack.len() {
        return false;
    }

    let mut offset = 0;
    while offset + len <= haystack.len() {
        if matches_at(haystack, offset, pattern, len) {
            return true;
        }
        offset += 1;
    }
    false
}
