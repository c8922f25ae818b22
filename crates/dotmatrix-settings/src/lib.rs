//! DotMatrix Settings Crate
//!
//! Handles printer configuration and settings persistence.

pub mod config;
pub mod error;

pub use config::{Config, PrinterSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
