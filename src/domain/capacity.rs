use serde::{Deserialize, Serialize};

use crate::domain::registration::{Registration, RegistrationStatus};

/// Point-in-time read of an event's booked and waitlisted counts
///
/// Only authoritative at the moment it was read; callers re-read it after
/// every registration write instead of adjusting a cached copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CapacitySnapshot {
    pub booked:     u32,
    pub waitlisted: u32
}

impl CapacitySnapshot {
    pub fn new(booked: u32, waitlisted: u32) -> Self {
        Self { booked, waitlisted }
    }

    /// A capacity of `0` is unlimited and never full
    pub fn is_full(&self, capacity: u32) -> bool {
        capacity > 0 && self.booked >= capacity
    }

    /// Seats left before the event is full, `None` when unlimited
    pub fn remaining(&self, capacity: u32) -> Option<u32> {
        (capacity > 0).then(|| capacity.saturating_sub(self.booked))
    }

    /// Counts seats, not registrations: a party of three books three seats
    pub fn from_registrations<'a>(registrations: impl IntoIterator<Item = &'a Registration>) -> Self {
        registrations.into_iter().fold(Self::default(), |mut snapshot, registration| {
            match registration.status {
                RegistrationStatus::Confirmed => {
                    snapshot.booked = snapshot.booked.saturating_add(registration.seats());
                }
                RegistrationStatus::Waitlist => {
                    snapshot.waitlisted = snapshot.waitlisted.saturating_add(registration.seats());
                }
            }
            snapshot
        })
    }

    /// Status a new party of `seats` gets against this snapshot
    ///
    /// Parties are never split: if the whole party does not fit it goes to
    /// the waitlist.
    pub fn status_for(&self, capacity: u32, seats: u32) -> RegistrationStatus {
        if capacity == 0 || self.booked.saturating_add(seats) <= capacity {
            RegistrationStatus::Confirmed
        } else {
            RegistrationStatus::Waitlist
        }
    }
}
