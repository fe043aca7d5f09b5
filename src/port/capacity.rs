use async_trait::async_trait;

use crate::domain::{
    capacity::CapacitySnapshot,
    error::SignupError,
    registration::{Registration, RegistrationRequest}
};

/// Port owning the authoritative booked/waitlist counts of events
///
/// Implementations must make the capacity check and the insert of
/// [`create_registration`](CapacityService::create_registration) a single
/// atomic step: two concurrent submissions for the last seat must never both
/// be confirmed.
#[async_trait]
pub trait CapacityService: Send + Sync {
    /// Current counts, reflecting every committed registration
    async fn capacity_state(&self, event_id: &str) -> Result<CapacitySnapshot, SignupError>;

    /// Validate and store a registration
    ///
    /// The registration is confirmed when its whole party fits in the seats
    /// left at insert time, and waitlisted otherwise, whatever an earlier
    /// snapshot suggested. A `capacity` of `0` never waitlists.
    async fn create_registration(
        &self,
        event_id: &str,
        capacity: u32,
        request: RegistrationRequest
    ) -> Result<Registration, SignupError>;

    /// All registrations of an event in insertion order
    async fn list_registrations(&self, event_id: &str) -> Result<Vec<Registration>, SignupError>;
}
