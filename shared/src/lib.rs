//! Shared types for the check-in kiosk
//!
//! Data model (guests, table layout, check-in records), wire types of the
//! remote check-in endpoint, and the error code system.

pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, ErrorCode};
pub use models::{
    CheckInOutcome, CheckInRecord, CheckInStatus, GuestRecord, GuestTableStatus, StatusSource,
    Suggestion, TableCheckIn, TableLayout, TableStatus,
};
pub use request::RemoteRequest;
pub use types::TableId;
