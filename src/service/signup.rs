//! Signup orchestration
//!
//! Ties the event source, the capacity store and the resolver together for
//! the two things an event page does: show the signup area and accept a
//! submission.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use tracing::{Level, event};

use crate::{
    domain::{
        badge::StatusBadge,
        capacity::CapacitySnapshot,
        colleague::{Colleague, normalize_colleagues},
        constant::{resolver, signup},
        decision::RegistrationDecision,
        error::SignupError,
        event::EventConfig,
        registration::{Registration, RegistrationRequest}
    },
    port::{capacity::CapacityService, event_source::EventSource},
    resolver::{RegistrationWindowResolver, labels::CapacityLabels}
};

/// Everything needed to draw the signup area of one event
#[derive(Debug, Clone, Serialize)]
pub struct SignupView {
    #[serde(skip)]
    pub config:     EventConfig,
    pub title:      Option<String>,
    pub decision:   RegistrationDecision,
    pub snapshot:   CapacitySnapshot,
    pub labels:     CapacityLabels,
    pub badge:      StatusBadge,
    pub notice_key: &'static str,
    pub colleagues: Vec<Colleague>
}

impl SignupView {
    /// Resolve the view for a snapshot that was just read
    pub fn resolve(config: EventConfig, snapshot: CapacitySnapshot, now: DateTime<Utc>) -> Self {
        if !config.module_enabled {
            event!(Level::DEBUG, event = resolver::MODULE_DISABLED, event_id = %config.id);
        }
        let decision = RegistrationWindowResolver::resolve_with_module(&config, &snapshot, now);
        event!(Level::DEBUG, event = resolver::DECISION_RESOLVED, event_id = %config.id,
               mode = %decision.mode, reason = %decision.reason);

        Self {
            labels: CapacityLabels::from_snapshot(config.capacity, &snapshot),
            badge: StatusBadge::for_status(&config.status, snapshot.is_full(config.capacity)),
            notice_key: decision.notice_key(),
            config,
            title: None,
            decision,
            snapshot,
            colleagues: Vec::new()
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_colleagues(mut self, colleagues: Vec<Colleague>) -> Self {
        self.colleagues = colleagues;
        self
    }
}

/// Result of an accepted submission
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub registration: Registration,
    /// View resolved against the snapshot read after the write
    pub view:         SignupView
}

pub struct SignupService {
    events:         Arc<dyn EventSource>,
    capacity:       Arc<dyn CapacityService>,
    site_offset:    FixedOffset,
    module_default: bool,
    roster:         Vec<Colleague>
}

impl SignupService {
    pub fn new(
        events: Arc<dyn EventSource>,
        capacity: Arc<dyn CapacityService>,
        site_offset: FixedOffset,
        module_default: bool
    ) -> Self {
        Self { events, capacity, site_offset, module_default, roster: Vec::new() }
    }

    /// Roster that colleague indices in event metadata point into
    pub fn with_roster(mut self, roster: Vec<Colleague>) -> Self {
        self.roster = roster;
        self
    }

    /// Resolve the signup area of an event at `now`
    pub async fn render(&self, event_id: &str, now: DateTime<Utc>) -> Result<SignupView, SignupError> {
        let metadata = self.events.event_metadata(event_id).await?;
        let config = metadata.to_config(self.site_offset, self.module_default)?;
        let colleagues = normalize_colleagues(&metadata.colleagues, &self.roster);

        let view = self.resolve_view(config, metadata.title, colleagues, now).await?;

        event!(Level::DEBUG, event = signup::VIEW_RENDERED, event_id = %event_id, decision = %view.decision);
        Ok(view)
    }

    /// Accept a submission if the form is currently shown
    ///
    /// The status of the stored registration is decided by the capacity
    /// store at insert time, so a submission resolved as `open_form` can
    /// still land on the waitlist when the last seat went in between.
    pub async fn submit(
        &self,
        event_id: &str,
        request: RegistrationRequest,
        now: DateTime<Utc>
    ) -> Result<SubmitOutcome, SignupError> {
        event!(Level::DEBUG, event = signup::SUBMISSION_RECEIVED, event_id = %event_id,
               party_size = request.party_size);

        let view = self.render(event_id, now).await?;
        if !view.decision.shows_form() {
            event!(Level::INFO, event = signup::SUBMISSION_REJECTED, event_id = %event_id,
                   decision = %view.decision);
            return Err(SignupError::RegistrationClosed(view.decision));
        }

        let registration = self.capacity.create_registration(event_id, view.config.capacity, request).await?;

        event!(Level::INFO, event = signup::REGISTRATION_CREATED, event_id = %event_id,
               registration_id = %registration.id, status = %registration.status);

        let SignupView { config, title, colleagues, .. } = view;
        let view = self.resolve_view(config, title, colleagues, now).await?;

        Ok(SubmitOutcome { registration, view })
    }

    async fn resolve_view(
        &self,
        config: EventConfig,
        title: Option<String>,
        colleagues: Vec<Colleague>,
        now: DateTime<Utc>
    ) -> Result<SignupView, SignupError> {
        let snapshot = self.capacity.capacity_state(&config.id).await?;
        event!(Level::TRACE, event = signup::SNAPSHOT_REFRESHED, event_id = %config.id,
               booked = snapshot.booked, waitlisted = snapshot.waitlisted);

        Ok(SignupView::resolve(config, snapshot, now).with_title(title).with_colleagues(colleagues))
    }
}
