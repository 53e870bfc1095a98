//! Requests to the remote check-in endpoint
//!
//! The endpoint is a single URL that dispatches on the `action` field:
//! ```json
//! { "action": "checkin", "guestId": "1", "guestName": "...", "table": 5, "deviceId": "..." }
//! ```

use crate::types::TableId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "action",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum RemoteRequest {
    #[serde(rename = "checkin")]
    CheckIn {
        guest_id: String,
        guest_name: String,
        table: TableId,
        device_id: String,
    },
    CheckStatus {
        guest_id: String,
    },
    GetTableStatus {
        table: TableId,
    },
    GetGuestAndTableStatus {
        guest_id: String,
        table: TableId,
    },
}

impl RemoteRequest {
    /// Wire name of the action, for logs
    pub fn action(&self) -> &'static str {
        match self {
            Self::CheckIn { .. } => "checkin",
            Self::CheckStatus { .. } => "checkStatus",
            Self::GetTableStatus { .. } => "getTableStatus",
            Self::GetGuestAndTableStatus { .. } => "getGuestAndTableStatus",
        }
    }
}
