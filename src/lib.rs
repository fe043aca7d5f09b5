//! # Event signup engine
//!
//! Decides what the signup area of an event page shows and takes
//! registrations against a capacity store.
//!
//! This crate provides functionality to:
//! - Resolve booking window, status and capacity into a registration decision
//! - Format availability and waitlist labels in English and Spanish
//! - Normalise loosely typed event metadata into a typed configuration
//! - Store registrations atomically, confirming or waitlisting each party

pub mod adapter;
pub mod cli;
pub mod config;
pub mod domain;
pub mod i18n;
pub mod port;
pub mod resolver;
pub mod service;

pub use domain::{
    capacity::CapacitySnapshot,
    decision::{DecisionReason, RegistrationDecision, RegistrationMode},
    error::SignupError,
    event::{EventConfig, EventStatus}
};
pub use resolver::RegistrationWindowResolver;
pub use service::signup::{SignupService, SignupView, SubmitOutcome};
