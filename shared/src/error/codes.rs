//! Unified error codes for the check-in kiosk
//!
//! Error codes are organized by category:
//! - 1xxx: Dataset errors
//! - 2xxx: Guest lookup errors
//! - 3xxx: Check-in errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they serialize
/// compactly into notifications and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 1xxx: Dataset ====================
    /// Guest or table dataset could not be read or parsed
    DatasetLoadFailed = 1001,
    /// Dataset parsed but violates a load-time invariant
    DatasetInvalid = 1002,

    // ==================== 2xxx: Guest lookup ====================
    /// No guest matched the query
    GuestNotFound = 2001,
    /// Query was empty after trimming
    EmptyQuery = 2002,

    // ==================== 3xxx: Check-in ====================
    /// Remote check-in service unreachable or timed out
    RemoteUnavailable = 3001,
    /// Remote check-in service answered with `success: false`
    RemoteRejected = 3002,
    /// Local check-in cache could not be written
    LocalWriteFailed = 3003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::DatasetLoadFailed => "Guest data could not be loaded",
            ErrorCode::DatasetInvalid => "Guest data is invalid",

            ErrorCode::GuestNotFound => "No guest matches that name",
            ErrorCode::EmptyQuery => "Please enter a name to search",

            ErrorCode::RemoteUnavailable => "Check-in service is unavailable",
            ErrorCode::RemoteRejected => "Check-in service rejected the request",
            ErrorCode::LocalWriteFailed => "Check-in could not be saved on this device",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1001 => Ok(ErrorCode::DatasetLoadFailed),
            1002 => Ok(ErrorCode::DatasetInvalid),

            2001 => Ok(ErrorCode::GuestNotFound),
            2002 => Ok(ErrorCode::EmptyQuery),

            3001 => Ok(ErrorCode::RemoteUnavailable),
            3002 => Ok(ErrorCode::RemoteRejected),
            3003 => Ok(ErrorCode::LocalWriteFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
