//! Check-in Model

use crate::types::TableId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A timestamped assertion that a guest has arrived, tied to a device
///
/// Field aliases accept cache files written by older kiosk builds, which
/// stored `id`/`name` instead of `guestId`/`guestName`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRecord {
    #[serde(alias = "id")]
    pub guest_id: String,
    #[serde(alias = "name")]
    pub guest_name: String,
    pub table: TableId,
    #[serde(rename = "timestamp")]
    pub timestamp_utc: DateTime<Utc>,
    pub device_id: String,
}

/// Where a status answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusSource {
    Remote,
    Local,
    None,
}

/// Reconciled check-in status of one guest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInStatus {
    pub checked_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_in_at_utc: Option<DateTime<Utc>>,
    pub source: StatusSource,
}

impl CheckInStatus {
    pub fn remote(checked_in: bool, checked_in_at_utc: Option<DateTime<Utc>>) -> Self {
        Self {
            checked_in,
            checked_in_at_utc,
            source: StatusSource::Remote,
        }
    }

    pub fn local(record: &CheckInRecord) -> Self {
        Self {
            checked_in: true,
            checked_in_at_utc: Some(record.timestamp_utc),
            source: StatusSource::Local,
        }
    }

    pub fn none() -> Self {
        Self {
            checked_in: false,
            checked_in_at_utc: None,
            source: StatusSource::None,
        }
    }
}

/// One guest already checked in at a table, as reported by the remote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCheckIn {
    pub guest_name: String,
    #[serde(default)]
    pub timestamp: String,
}

impl TableCheckIn {
    /// Parse the remote timestamp if it is RFC 3339
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        crate::util::parse_utc(&self.timestamp)
    }
}

/// Who has checked in at a table
///
/// `offline` distinguishes "nobody yet" from "could not ask".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStatus {
    pub check_ins: Vec<TableCheckIn>,
    pub offline: bool,
}

impl TableStatus {
    pub fn online(check_ins: Vec<TableCheckIn>) -> Self {
        Self {
            check_ins,
            offline: false,
        }
    }

    pub fn offline() -> Self {
        Self {
            check_ins: Vec::new(),
            offline: true,
        }
    }
}

/// Guest status and table status fetched together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestTableStatus {
    pub guest: CheckInStatus,
    pub table: TableStatus,
}

/// Result of recording a check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInOutcome {
    pub recorded_remotely: bool,
    pub recorded_locally: bool,
}

impl CheckInOutcome {
    /// Saved on this device only
    pub fn is_offline(&self) -> bool {
        !self.recorded_remotely
    }
}
