//! Ports - interfaces to the collaborators the signup engine depends on

pub mod capacity;
pub mod event_source;
