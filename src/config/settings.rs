use std::{
    fs,
    path::{Path, PathBuf}
};

use anyhow::{Context, Result, bail};
use chrono::FixedOffset;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

use crate::i18n::Language;

/// Settings of the evreg CLI, stored as YAML in the platform config dir
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Language code of CLI output
    pub language:               String,
    /// Offset naive event dates are read in, e.g. `+02:00`
    pub utc_offset:             String,
    /// Where registrations are stored, platform data dir when unset
    pub data_dir:               Option<PathBuf>,
    /// YAML list of colleagues that event `index` references point into
    pub roster_file:            Option<PathBuf>,
    /// Module flag for events that do not carry one
    pub module_enabled_default: bool
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language:               Language::English.code().to_string(),
            utc_offset:             "+00:00".to_string(),
            data_dir:               None,
            roster_file:            None,
            module_enabled_default: true
        }
    }
}

impl Settings {
    pub fn site_offset(&self) -> Result<FixedOffset> {
        parse_utc_offset(&self.utc_offset)
    }

    /// Configured language, English when the stored code is unknown
    pub fn language(&self) -> Language {
        Language::from_code(&self.language).unwrap_or_else(|| {
            event!(Level::WARN, language = %self.language, "unknown language in settings, using English");
            Language::English
        })
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(get_project_dirs()?.data_dir().to_path_buf())
        }
    }
}

/// Get the project directories for cross-platform config path resolution
pub fn get_project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "evreg").context("Failed to determine project directories")
}

/// Get the settings file path
pub fn get_settings_file_path() -> Result<PathBuf> {
    Ok(get_project_dirs()?.config_dir().join("settings.yaml"))
}

/// Load settings from the platform config dir
pub fn load_settings() -> Result<Settings> {
    load_settings_from(&get_settings_file_path()?)
}

/// Load settings from `path`, defaults when the file does not exist
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings: Settings = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;

    settings.site_offset().with_context(|| format!("Invalid utc_offset in {}", path.display()))?;
    Ok(settings)
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(&get_settings_file_path()?, settings)
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let content = serde_yaml::to_string(settings).context("Failed to serialize settings")?;
    fs::write(path, content).with_context(|| format!("Failed to write settings file {}", path.display()))?;

    Ok(())
}

/// Persist the language choice
pub fn set_language(language: Language) -> Result<()> {
    let mut settings = load_settings()?;
    settings.language = language.code().to_string();
    save_settings(&settings)
}

/// Parse `Z`, `UTC`, `+HH:MM`, `-HH:MM` or `+HHMM`
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).context("zero offset");
    }

    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'+') => (1, &raw[1..]),
        Some(b'-') => (-1, &raw[1..]),
        _ => bail!("utc offset '{}' must start with '+' or '-'", raw)
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        bail!("utc offset '{}' is not in the form +HH:MM", raw);
    }

    let hours: i32 = digits[..2].parse()?;
    let minutes: i32 = digits[2..].parse()?;
    if minutes >= 60 {
        bail!("utc offset '{}' has more than 59 minutes", raw);
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .with_context(|| format!("utc offset '{}' is out of range", raw))
}
