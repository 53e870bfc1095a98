//! Check-in client: remote store first, local cache as fallback
//!
//! - Check-ins are written remotely (one attempt) and then always mirrored
//!   into the local cache. Only a failed local write is an error.
//! - Status queries trust any answer from the remote store, positive or
//!   negative, and consult the local cache only when the remote call fails.
//! - Table status is remote-only and reports `offline` on failure.

use crate::cache::LocalCache;
use crate::remote::RemoteCheckIn;
use crate::{ClientConfig, ClientError, ClientResult};
use shared::TableId;
use shared::models::{
    CheckInOutcome, CheckInRecord, CheckInStatus, GuestRecord, GuestTableStatus, TableCheckIn,
    TableStatus,
};
use shared::response::RemoteAck;
use shared::util::{now_utc, parse_utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub struct CheckInClient {
    remote: Option<Arc<dyn RemoteCheckIn>>,
    cache: LocalCache,
    device_id: String,
    timeout: Duration,
    prefer_combined_status: bool,
}

impl std::fmt::Debug for CheckInClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckInClient")
            .field("remote", &self.remote.is_some())
            .field("cache", &self.cache.path())
            .field("device_id", &self.device_id)
            .field("timeout", &self.timeout)
            .field("prefer_combined_status", &self.prefer_combined_status)
            .finish()
    }
}

impl CheckInClient {
    /// Build a client from configuration. Without an endpoint URL the
    /// client runs purely on the local cache.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let remote = match config.build_http_client() {
            Some(http) => Some(Arc::new(http?) as Arc<dyn RemoteCheckIn>),
            None => {
                tracing::warn!("No check-in endpoint configured, running offline");
                None
            }
        };
        Ok(Self::with_remote(config, remote))
    }

    /// Build a client around an explicit remote implementation
    ///
    /// Storage problems never prevent construction; they surface when a
    /// check-in or a clear has to write.
    pub fn with_remote(config: &ClientConfig, remote: Option<Arc<dyn RemoteCheckIn>>) -> Self {
        let cache = LocalCache::open(&config.cache_dir);
        let device_id = cache.device_id();

        tracing::info!(device_id = %device_id, cache = ?cache.path(), "Check-in client ready");

        Self {
            remote,
            cache,
            device_id,
            timeout: config.timeout,
            prefer_combined_status: config.prefer_combined_status,
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn cache(&self) -> &LocalCache {
        &self.cache
    }

    /// Run one remote call under the fixed timeout and turn a
    /// `success: false` answer into an error
    async fn remote_call<T, F>(&self, action: &'static str, call: F) -> ClientResult<T>
    where
        T: RemoteAck,
        F: Future<Output = ClientResult<T>>,
    {
        let result = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(self.timeout)),
        };

        let response = result.inspect_err(|e| {
            tracing::warn!(action, error = %e, "Remote call failed");
        })?;

        if !response.success() {
            let reason = response.error().unwrap_or("request not successful").to_string();
            tracing::warn!(action, reason = %reason, "Remote call rejected");
            return Err(ClientError::Rejected(reason));
        }
        Ok(response)
    }

    fn remote(&self) -> ClientResult<&Arc<dyn RemoteCheckIn>> {
        self.remote.as_ref().ok_or(ClientError::NotConfigured)
    }

    /// Record a check-in for `guest` from this device
    ///
    /// Returns an error only when the local cache write fails and the
    /// remote write did not succeed either.
    pub async fn record_check_in(&self, guest: &GuestRecord) -> ClientResult<CheckInOutcome> {
        let record = CheckInRecord {
            guest_id: guest.id.clone(),
            guest_name: guest.name.clone(),
            table: guest.table,
            timestamp_utc: now_utc(),
            device_id: self.device_id.clone(),
        };

        let recorded_remotely = match self.remote() {
            Ok(remote) => self
                .remote_call("checkin", remote.check_in(&record))
                .await
                .is_ok(),
            Err(_) => false,
        };

        match self.cache.put(&record) {
            Ok(()) => {
                if recorded_remotely {
                    tracing::info!(guest_id = %record.guest_id, table = %record.table, "Guest checked in");
                } else {
                    tracing::warn!(guest_id = %record.guest_id, table = %record.table, "Check-in saved locally only");
                }
                Ok(CheckInOutcome {
                    recorded_remotely,
                    recorded_locally: true,
                })
            }
            Err(e) if recorded_remotely => {
                tracing::error!(guest_id = %record.guest_id, error = %e, "Local mirror of remote check-in failed");
                Ok(CheckInOutcome {
                    recorded_remotely,
                    recorded_locally: false,
                })
            }
            Err(e) => {
                tracing::error!(guest_id = %record.guest_id, error = %e, "Check-in could not be saved");
                Err(e.into())
            }
        }
    }

    fn local_status(&self, guest_id: &str) -> CheckInStatus {
        match self.cache.get(guest_id) {
            Some(record) => CheckInStatus::local(&record),
            None => CheckInStatus::none(),
        }
    }

    /// Check-in status of one guest
    pub async fn get_status(&self, guest: &GuestRecord) -> CheckInStatus {
        let remote = match self.remote() {
            Ok(remote) => {
                self.remote_call("checkStatus", remote.check_status(&guest.id))
                    .await
            }
            Err(e) => Err(e),
        };

        let answer = remote.and_then(|resp| {
            let checked_in = required_flag(resp.is_checked_in, "checkStatus", "isCheckedIn")?;
            Ok((checked_in, resp.timestamp))
        });

        match answer {
            Ok((checked_in, timestamp)) => {
                CheckInStatus::remote(checked_in, timestamp.as_deref().and_then(parse_utc))
            }
            Err(_) => self.local_status(&guest.id),
        }
    }

    /// Who has checked in at `table`, in the order the remote store reports
    pub async fn get_table_status(&self, table: TableId) -> TableStatus {
        let remote = match self.remote() {
            Ok(remote) => {
                self.remote_call("getTableStatus", remote.table_status(table))
                    .await
            }
            Err(e) => Err(e),
        };

        match remote {
            Ok(resp) => TableStatus::online(resp.check_ins),
            Err(_) => TableStatus::offline(),
        }
    }

    /// Guest status plus table status, using the combined action when
    /// enabled and two concurrent calls otherwise
    ///
    /// An endpoint that rejects the combined action is asked again with the
    /// two separate calls.
    pub async fn get_guest_and_table_status(&self, guest: &GuestRecord) -> GuestTableStatus {
        if !self.prefer_combined_status {
            return self.separate_status(guest).await;
        }

        let remote = match self.remote() {
            Ok(remote) => {
                self.remote_call(
                    "getGuestAndTableStatus",
                    remote.guest_and_table_status(&guest.id, guest.table),
                )
                .await
            }
            Err(e) => Err(e),
        };

        let answer = remote.and_then(|resp| {
            let checked_in = required_flag(
                resp.guest_checked_in,
                "getGuestAndTableStatus",
                "guestCheckedIn",
            )?;
            Ok((checked_in, resp))
        });

        match answer {
            Ok((checked_in, resp)) => {
                let checked_in_at = resp
                    .guest_timestamp
                    .as_deref()
                    .and_then(parse_utc)
                    .or_else(|| find_timestamp(&resp.table_check_ins, &guest.name));
                GuestTableStatus {
                    guest: CheckInStatus::remote(checked_in, checked_in_at),
                    table: TableStatus::online(resp.table_check_ins),
                }
            }
            Err(ClientError::Rejected(reason)) => {
                tracing::info!(reason = %reason, "Combined status rejected, using separate calls");
                self.separate_status(guest).await
            }
            Err(_) => GuestTableStatus {
                guest: self.local_status(&guest.id),
                table: TableStatus::offline(),
            },
        }
    }

    async fn separate_status(&self, guest: &GuestRecord) -> GuestTableStatus {
        let (status, table) =
            tokio::join!(self.get_status(guest), self.get_table_status(guest.table));
        GuestTableStatus {
            guest: status,
            table,
        }
    }

    /// Debug: every check-in cached on this device
    pub fn local_check_ins(&self) -> Vec<CheckInRecord> {
        self.cache.list()
    }

    /// Debug: drop every cached check-in
    pub fn clear_local_check_ins(&self) -> ClientResult<usize> {
        Ok(self.cache.clear()?)
    }
}

/// A success response must still carry its status flag; a missing one is
/// treated like an unreadable response
fn required_flag(value: Option<bool>, action: &'static str, field: &str) -> ClientResult<bool> {
    value.ok_or_else(|| {
        tracing::warn!(action, field, "Remote response missing status flag");
        ClientError::InvalidResponse(format!("{action} response without {field}"))
    })
}

fn find_timestamp(
    check_ins: &[TableCheckIn],
    guest_name: &str,
) -> Option<chrono::DateTime<chrono::Utc>> {
    check_ins
        .iter()
        .find(|c| c.guest_name == guest_name)
        .and_then(TableCheckIn::timestamp_utc)
}
