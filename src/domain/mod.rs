//! Domain types of the signup engine

pub mod badge;
pub mod capacity;
pub mod colleague;
pub mod constant;
pub mod decision;
pub mod error;
pub mod event;
pub mod metadata;
pub mod registration;
pub mod window;
