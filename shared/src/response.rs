//! Responses from the remote check-in endpoint
//!
//! Every response carries `success`; a `false` value is a logical failure
//! with an optional `error` string, even when the HTTP exchange succeeded.

use crate::models::TableCheckIn;
use serde::Deserialize;

/// Common acknowledgement fields
pub trait RemoteAck {
    fn success(&self) -> bool;
    fn error(&self) -> Option<&str>;
}

macro_rules! impl_remote_ack {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RemoteAck for $ty {
                fn success(&self) -> bool {
                    self.success
                }

                fn error(&self) -> Option<&str> {
                    self.error.as_deref()
                }
            }
        )*
    };
}

/// Response to `checkin`
#[derive(Debug, Clone, Deserialize)]
pub struct CheckInResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response to `checkStatus`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub success: bool,
    /// Absent on rejections
    #[serde(default, alias = "checkedIn")]
    pub is_checked_in: Option<bool>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response to `getTableStatus`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStatusResponse {
    pub success: bool,
    #[serde(default)]
    pub check_ins: Vec<TableCheckIn>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response to `getGuestAndTableStatus`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestAndTableStatusResponse {
    pub success: bool,
    #[serde(default)]
    pub guest_checked_in: Option<bool>,
    #[serde(default)]
    pub guest_timestamp: Option<String>,
    #[serde(default)]
    pub table_check_ins: Vec<TableCheckIn>,
    #[serde(default)]
    pub error: Option<String>,
}

impl_remote_ack!(
    CheckInResponse,
    StatusResponse,
    TableStatusResponse,
    GuestAndTableStatusResponse,
);
