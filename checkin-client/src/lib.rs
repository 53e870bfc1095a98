//! Check-in client for the seating kiosk
//!
//! Records guest check-ins against a remote, spreadsheet-backed endpoint and
//! mirrors every check-in into a local cache so the kiosk keeps working
//! offline. Status queries prefer the remote store whenever it answers.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod remote;

pub use cache::{CacheError, LocalCache};
pub use client::CheckInClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use remote::RemoteCheckIn;

// Re-export shared types for convenience
pub use shared::models::{
    CheckInOutcome, CheckInRecord, CheckInStatus, GuestTableStatus, StatusSource, TableCheckIn,
    TableStatus,
};
