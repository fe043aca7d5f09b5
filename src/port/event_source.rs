use async_trait::async_trait;

use crate::domain::{error::SignupError, metadata::EventMetadata};

/// Port for reading event metadata keyed by event identifier
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Raw metadata of one event, `SignupError::NotFound` when unknown
    async fn event_metadata(&self, event_id: &str) -> Result<EventMetadata, SignupError>;
}
