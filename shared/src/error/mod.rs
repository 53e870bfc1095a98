//! Unified error system for the check-in kiosk
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`Severity`]: Whether an error blocks the page, prompts a retry or stays silent
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 1xxx: Dataset errors
//! - 2xxx: Guest lookup errors
//! - 3xxx: Check-in errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, Severity};
//!
//! let err = AppError::no_match("xyz");
//! assert_eq!(err.code, ErrorCode::GuestNotFound);
//! assert_eq!(err.severity(), Severity::Recoverable);
//! ```

mod codes;
mod severity;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use severity::Severity;
pub use types::AppError;
