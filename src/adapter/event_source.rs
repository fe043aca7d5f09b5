use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{Level, event};

use crate::{
    domain::{
        colleague::Colleague,
        constant::{colleagues, metadata},
        error::SignupError,
        metadata::EventMetadata
    },
    port::event_source::EventSource
};

/// Event metadata read from YAML files, one `<event_id>.yaml` per event
pub struct FileEventSource {
    dir:    PathBuf,
    /// Explicit file checked before the directory, whatever its name
    pinned: Option<PathBuf>
}

impl FileEventSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), pinned: None }
    }

    /// Source serving one event file, then the rest of its directory
    pub fn for_event_file(path: &Path) -> Self {
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self { dir, pinned: Some(path.to_path_buf()) }
    }
}

/// Read one event file
///
/// When the document carries no `id`, the file stem is used instead.
pub async fn load_event_file(path: &Path) -> Result<EventMetadata, SignupError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SignupError::NotFound(path.display().to_string()));
        }
        Err(e) => return Err(SignupError::storage_failed("read event file", e))
    };

    let mut meta: EventMetadata = serde_yaml::from_str(&content)?;
    if meta.id.trim().is_empty() {
        meta.id = path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default();
    }

    event!(Level::DEBUG, event = metadata::EVENT_LOADED, event_id = %meta.id, path = %path.display());
    Ok(meta)
}

/// Read the colleague roster, a YAML list that event `index` references point into
pub async fn load_roster(path: &Path) -> Result<Vec<Colleague>, SignupError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SignupError::NotFound(path.display().to_string()));
        }
        Err(e) => return Err(SignupError::storage_failed("read roster file", e))
    };

    let roster: Vec<Colleague> = serde_yaml::from_str(&content)?;
    event!(Level::DEBUG, event = colleagues::ROSTER_LOADED, colleagues = roster.len(), path = %path.display());
    Ok(roster)
}

#[async_trait]
impl EventSource for FileEventSource {
    async fn event_metadata(&self, event_id: &str) -> Result<EventMetadata, SignupError> {
        if let Some(pinned) = &self.pinned {
            let meta = load_event_file(pinned).await?;
            if meta.id == event_id {
                return Ok(meta);
            }
        }

        let yaml = self.dir.join(format!("{}.yaml", event_id));
        let path = if yaml.exists() { yaml } else { self.dir.join(format!("{}.yml", event_id)) };

        let meta = load_event_file(&path).await.map_err(|e| match e {
            SignupError::NotFound(_) => SignupError::NotFound(event_id.to_string()),
            other => other
        })?;

        if meta.id != event_id {
            return Err(SignupError::Configuration(format!(
                "event file {} declares id '{}' instead of '{}'",
                path.display(),
                meta.id,
                event_id
            )));
        }
        Ok(meta)
    }
}
