//! In-memory adapters
//!
//! HashMap-backed implementations of the ports, for tests and embedding.
//! Everything is lost when the process exits.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{Level, event};

use crate::{
    domain::{
        capacity::CapacitySnapshot,
        constant::capacity,
        error::SignupError,
        metadata::EventMetadata,
        registration::{Registration, RegistrationRequest, RegistrationStatus}
    },
    port::{capacity::CapacityService, event_source::EventSource}
};

/// In-memory capacity service
///
/// The write lock is held across the capacity check and the insert, which
/// makes check-and-reserve atomic within the process.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCapacityService {
    /// Registrations stored by event_id, in insertion order
    registrations: Arc<RwLock<HashMap<String, Vec<Registration>>>>
}

impl InMemoryCapacityService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CapacityService for InMemoryCapacityService {
    async fn capacity_state(&self, event_id: &str) -> Result<CapacitySnapshot, SignupError> {
        let store = self.registrations.read().await;
        let snapshot = store.get(event_id).map(CapacitySnapshot::from_registrations).unwrap_or_default();

        event!(Level::TRACE, event = capacity::SNAPSHOT_READ, event_id = %event_id,
               booked = snapshot.booked, waitlisted = snapshot.waitlisted);
        Ok(snapshot)
    }

    async fn create_registration(
        &self,
        event_id: &str,
        capacity: u32,
        request: RegistrationRequest
    ) -> Result<Registration, SignupError> {
        let request = request.normalized();
        request.validate()?;

        let mut store = self.registrations.write().await;
        let event_registrations = store.entry(event_id.to_string()).or_default();

        let snapshot = CapacitySnapshot::from_registrations(event_registrations.iter());
        let status = snapshot.status_for(capacity, request.party_size);
        let registration = Registration::new(event_id, request, status, Utc::now());

        match status {
            RegistrationStatus::Confirmed => {
                event!(Level::DEBUG, event = capacity::SEAT_RESERVED, event_id = %event_id,
                       registration_id = %registration.id, seats = registration.seats());
            }
            RegistrationStatus::Waitlist => {
                event!(Level::DEBUG, event = capacity::WAITLIST_ASSIGNED, event_id = %event_id,
                       registration_id = %registration.id, seats = registration.seats());
            }
        }

        event_registrations.push(registration.clone());
        Ok(registration)
    }

    async fn list_registrations(&self, event_id: &str) -> Result<Vec<Registration>, SignupError> {
        let store = self.registrations.read().await;
        Ok(store.get(event_id).cloned().unwrap_or_default())
    }
}

/// In-memory event metadata source
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventSource {
    events: Arc<RwLock<HashMap<String, EventMetadata>>>
}

impl InMemoryEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the metadata of an event
    pub async fn put(&self, metadata: EventMetadata) {
        self.events.write().await.insert(metadata.id.clone(), metadata);
    }
}

#[async_trait]
impl EventSource for InMemoryEventSource {
    async fn event_metadata(&self, event_id: &str) -> Result<EventMetadata, SignupError> {
        self.events.read().await.get(event_id).cloned().ok_or_else(|| SignupError::NotFound(event_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> RegistrationRequest {
        RegistrationRequest::new(name, format!("{}@example.org", name.to_lowercase()))
    }

    #[tokio::test]
    async fn test_last_seat_then_waitlist() {
        let service = InMemoryCapacityService::new();

        let first = service.create_registration("e1", 2, request("Ada")).await.unwrap();
        let second = service.create_registration("e1", 2, request("Grace")).await.unwrap();
        let third = service.create_registration("e1", 2, request("Alan")).await.unwrap();

        assert_eq!(first.status, RegistrationStatus::Confirmed);
        assert_eq!(second.status, RegistrationStatus::Confirmed);
        assert_eq!(third.status, RegistrationStatus::Waitlist);
        assert_eq!(service.capacity_state("e1").await.unwrap(), CapacitySnapshot::new(2, 1));

        // Other events are unaffected
        assert_eq!(service.capacity_state("e2").await.unwrap(), CapacitySnapshot::default());
    }

    #[tokio::test]
    async fn test_invalid_request_is_not_stored() {
        let service = InMemoryCapacityService::new();
        let result = service.create_registration("e1", 5, RegistrationRequest::new("", "nope")).await;

        assert!(matches!(result, Err(SignupError::Validation(_))));
        assert!(service.list_registrations("e1").await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_for_last_seat() {
        let service = InMemoryCapacityService::new();
        service.create_registration("e1", 10, request("Seed").with_party_size(9)).await.unwrap();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move { service.create_registration("e1", 10, request(&format!("P{}", i))).await })
            })
            .collect();

        let mut confirmed = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().status == RegistrationStatus::Confirmed {
                confirmed += 1;
            }
        }

        assert_eq!(confirmed, 1);
        assert_eq!(service.capacity_state("e1").await.unwrap(), CapacitySnapshot::new(10, 15));
    }

    #[tokio::test]
    async fn test_event_source_lookup() {
        let source = InMemoryEventSource::new();
        source.put(EventMetadata { id: "e1".to_string(), ..Default::default() }).await;

        assert_eq!(source.event_metadata("e1").await.unwrap().id, "e1");
        assert!(matches!(source.event_metadata("missing").await, Err(SignupError::NotFound(_))));
    }
}
