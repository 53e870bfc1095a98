//! Presentation severity of error codes

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// How an error is surfaced to the person at the kiosk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Page-level message, no partial UI
    Blocking,
    /// Notice the user can dismiss and retry from
    Recoverable,
    /// Absorbed by a fallback; logged only
    Silent,
}

impl ErrorCode {
    /// Get the presentation severity for this error code
    pub fn severity(&self) -> Severity {
        match self {
            ErrorCode::DatasetLoadFailed | ErrorCode::DatasetInvalid => Severity::Blocking,
            ErrorCode::RemoteUnavailable | ErrorCode::RemoteRejected => Severity::Silent,
            ErrorCode::GuestNotFound | ErrorCode::EmptyQuery | ErrorCode::LocalWriteFailed => {
                Severity::Recoverable
            }
        }
    }
}
