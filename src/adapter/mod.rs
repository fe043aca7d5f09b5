//! Adapters - concrete implementations of the ports

pub mod event_source;
pub mod file_store;
pub mod memory;
