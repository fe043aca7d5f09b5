//! Availability and waitlist labels shown next to the signup form
//!
//! Labels are computed as values first and rendered to text only on request,
//! so callers that do their own localisation can use the values directly.

use serde::Serialize;

use crate::{domain::capacity::CapacitySnapshot, i18n::Language, t, t_params};

/// Seat availability of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AvailabilityLabel {
    Unlimited,
    Seats { booked: u32, capacity: u32 }
}

impl AvailabilityLabel {
    pub fn new(capacity: u32, booked: u32) -> Self {
        if capacity == 0 { AvailabilityLabel::Unlimited } else { AvailabilityLabel::Seats { booked, capacity } }
    }

    pub fn render(&self, lang: Language) -> String {
        match self {
            AvailabilityLabel::Unlimited => t!("label_unlimited", lang),
            AvailabilityLabel::Seats { booked, capacity } => format!("{} / {}", booked, capacity)
        }
    }
}

/// Waitlist size of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum WaitlistLabel {
    Empty,
    Waiting(u32)
}

impl WaitlistLabel {
    pub fn new(waitlisted: u32) -> Self {
        if waitlisted == 0 { WaitlistLabel::Empty } else { WaitlistLabel::Waiting(waitlisted) }
    }

    pub fn render(&self, lang: Language) -> String {
        match self {
            WaitlistLabel::Empty => t!("label_no_waitlist", lang),
            WaitlistLabel::Waiting(1) => t_params!("label_waitlist_one", &["1"], lang),
            WaitlistLabel::Waiting(count) => t_params!("label_waitlist_other", &[&count.to_string()], lang)
        }
    }
}

/// Both labels for one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityLabels {
    pub availability: AvailabilityLabel,
    pub waitlist:     WaitlistLabel
}

impl CapacityLabels {
    pub fn new(capacity: u32, booked: u32, waitlisted: u32) -> Self {
        Self { availability: AvailabilityLabel::new(capacity, booked), waitlist: WaitlistLabel::new(waitlisted) }
    }

    pub fn from_snapshot(capacity: u32, snapshot: &CapacitySnapshot) -> Self {
        Self::new(capacity, snapshot.booked, snapshot.waitlisted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_is_unlimited_whatever_is_booked() {
        for booked in [0, 1, 999] {
            let label = AvailabilityLabel::new(0, booked);
            assert_eq!(label, AvailabilityLabel::Unlimited);
            assert_eq!(label.render(Language::English), "unlimited");
        }
        assert_eq!(AvailabilityLabel::new(0, 3).render(Language::Spanish), "ilimitado");
    }

    #[test]
    fn test_seats_render_as_booked_over_capacity() {
        assert_eq!(AvailabilityLabel::new(50, 50).render(Language::English), "50 / 50");
        assert_eq!(AvailabilityLabel::new(50, 7).render(Language::Spanish), "7 / 50");
    }

    #[test]
    fn test_waitlist_pluralisation() {
        assert_eq!(WaitlistLabel::new(0).render(Language::English), "no waitlist");
        assert_eq!(WaitlistLabel::new(1).render(Language::English), "1 person on the waitlist");
        assert_eq!(WaitlistLabel::new(3).render(Language::English), "3 people on the waitlist");
        assert_eq!(WaitlistLabel::new(1).render(Language::Spanish), "1 persona en lista de espera");
        assert_eq!(WaitlistLabel::new(3).render(Language::Spanish), "3 personas en lista de espera");
    }

    #[test]
    fn test_labels_from_snapshot() {
        let labels = CapacityLabels::from_snapshot(20, &CapacitySnapshot::new(20, 2));
        assert_eq!(labels.availability, AvailabilityLabel::Seats { booked: 20, capacity: 20 });
        assert_eq!(labels.waitlist, WaitlistLabel::Waiting(2));
    }
}
