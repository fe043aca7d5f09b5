//! Settings file of the evreg CLI

pub mod settings;

pub use settings::{Settings, load_settings, save_settings, set_language};
