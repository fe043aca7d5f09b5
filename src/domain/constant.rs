//! Domain Events - Structured events for internal monitoring and debugging

/// Resolver Events
pub mod resolver {
    pub const DECISION_RESOLVED: &str = "decision.resolved";
    pub const MODULE_DISABLED: &str = "decision.module_disabled";
}

/// SignupService Events
pub mod signup {
    pub const VIEW_RENDERED: &str = "view.rendered";
    pub const SUBMISSION_RECEIVED: &str = "submission.received";
    pub const SUBMISSION_REJECTED: &str = "submission.rejected";
    pub const REGISTRATION_CREATED: &str = "registration.created";
    pub const SNAPSHOT_REFRESHED: &str = "snapshot.refreshed";
}

/// CapacityService Events
pub mod capacity {
    pub const SNAPSHOT_READ: &str = "snapshot.read";
    pub const SEAT_RESERVED: &str = "seat.reserved";
    pub const WAITLIST_ASSIGNED: &str = "waitlist.assigned";
    pub const STORE_LOADED: &str = "store.loaded";
    pub const STORE_PERSISTED: &str = "store.persisted";
    pub const STORE_FAILED: &str = "store.failed";
}

/// Event metadata Events
pub mod metadata {
    pub const EVENT_LOADED: &str = "event.loaded";
    pub const UNKNOWN_STATUS: &str = "event.unknown_status";
}

/// Colleague normalisation Events
pub mod colleagues {
    pub const ROSTER_INDEX_MISSING: &str = "colleague.roster_index_missing";
    pub const LEGACY_RECORD_USED: &str = "colleague.legacy_record_used";
    pub const ROSTER_LOADED: &str = "colleague.roster_loaded";
}
