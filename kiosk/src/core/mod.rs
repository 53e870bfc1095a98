//! Core module - configuration and error definitions
//!
//! - [`Config`] - kiosk configuration
//! - [`KioskError`] - kiosk errors

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{DatasetSourceError, KioskError, Result};
