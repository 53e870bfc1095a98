// checkin-client/tests/client_integration.rs
// Reconciliation between the remote store and the local cache

use async_trait::async_trait;
use checkin_client::{
    CheckInClient, ClientConfig, ClientError, ClientResult, LocalCache, RemoteCheckIn,
    StatusSource,
};
use parking_lot::Mutex;
use shared::TableId;
use shared::models::{CheckInRecord, GuestRecord, TableCheckIn};
use shared::response::{
    CheckInResponse, GuestAndTableStatusResponse, StatusResponse, TableStatusResponse,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Behavior {
    /// Answer normally
    Succeed,
    /// Answer `success: false`
    Reject,
    /// Fail at the transport level
    Fail,
    /// Never answer within the client timeout
    Hang,
    /// Answer `success: true` without the status flag
    Malformed,
}

/// In-memory stand-in for the spreadsheet endpoint
struct MockRemote {
    behavior: Mutex<Behavior>,
    checked_in: Mutex<HashMap<String, CheckInRecord>>,
    calls: AtomicUsize,
    /// Endpoint without the combined action
    legacy: AtomicBool,
}

impl MockRemote {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior: Mutex::new(behavior),
            checked_in: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            legacy: AtomicBool::new(false),
        })
    }

    fn set_behavior(&self, behavior: Behavior) {
        *self.behavior.lock() = behavior;
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Apply the configured behavior; `Ok(false)` means "reject"
    async fn gate(&self) -> ClientResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = *self.behavior.lock();
        match behavior {
            Behavior::Succeed | Behavior::Malformed => Ok(true),
            Behavior::Reject => Ok(false),
            Behavior::Fail => Err(ClientError::InvalidResponse("connection reset".to_string())),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(true)
            }
        }
    }

    fn flag(&self, value: bool) -> Option<bool> {
        (*self.behavior.lock() != Behavior::Malformed).then_some(value)
    }

    fn table_entries(&self, table: TableId) -> Vec<TableCheckIn> {
        let mut entries: Vec<_> = self
            .checked_in
            .lock()
            .values()
            .filter(|r| r.table == table)
            .map(|r| TableCheckIn {
                guest_name: r.guest_name.clone(),
                timestamp: r.timestamp_utc.to_rfc3339(),
            })
            .collect();
        entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        entries
    }
}

#[async_trait]
impl RemoteCheckIn for MockRemote {
    async fn check_in(&self, record: &CheckInRecord) -> ClientResult<CheckInResponse> {
        if !self.gate().await? {
            return Ok(CheckInResponse {
                success: false,
                error: Some("Sheet locked".to_string()),
            });
        }
        self.checked_in
            .lock()
            .insert(record.guest_id.clone(), record.clone());
        Ok(CheckInResponse {
            success: true,
            error: None,
        })
    }

    async fn check_status(&self, guest_id: &str) -> ClientResult<StatusResponse> {
        let ok = self.gate().await?;
        let record = self.checked_in.lock().get(guest_id).cloned();
        Ok(StatusResponse {
            success: ok,
            is_checked_in: self.flag(record.is_some()),
            timestamp: record.map(|r| r.timestamp_utc.to_rfc3339()),
            error: None,
        })
    }

    async fn table_status(&self, table: TableId) -> ClientResult<TableStatusResponse> {
        let ok = self.gate().await?;
        Ok(TableStatusResponse {
            success: ok,
            check_ins: self.table_entries(table),
            error: None,
        })
    }

    async fn guest_and_table_status(
        &self,
        guest_id: &str,
        table: TableId,
    ) -> ClientResult<GuestAndTableStatusResponse> {
        let ok = self.gate().await?;
        if self.legacy.load(Ordering::SeqCst) {
            return Ok(GuestAndTableStatusResponse {
                success: false,
                guest_checked_in: None,
                guest_timestamp: None,
                table_check_ins: Vec::new(),
                error: Some("Unknown action".to_string()),
            });
        }
        let checked_in = self.checked_in.lock().contains_key(guest_id);
        Ok(GuestAndTableStatusResponse {
            success: ok,
            guest_checked_in: self.flag(checked_in),
            guest_timestamp: None,
            table_check_ins: self.table_entries(table),
            error: None,
        })
    }
}

fn guest(id: &str, name: &str, table: u32) -> GuestRecord {
    GuestRecord {
        name: name.to_string(),
        id: id.to_string(),
        table: TableId::new(table),
        description: None,
    }
}

fn client_with(dir: &TempDir, remote: &Arc<MockRemote>) -> CheckInClient {
    let config = ClientConfig::offline()
        .with_cache_dir(dir.path())
        .with_timeout(Duration::from_millis(100));
    CheckInClient::with_remote(&config, Some(remote.clone() as Arc<dyn RemoteCheckIn>))
}

#[tokio::test]
async fn test_check_in_always_leaves_local_entry() {
    for behavior in [
        Behavior::Succeed,
        Behavior::Reject,
        Behavior::Fail,
        Behavior::Hang,
    ] {
        let dir = TempDir::new().unwrap();
        let remote = MockRemote::new(behavior);
        let client = client_with(&dir, &remote);
        let g = guest("1", "Nguyen Van A", 5);

        let outcome = client.record_check_in(&g).await.unwrap();
        assert!(outcome.recorded_locally, "{:?}", behavior);
        assert_eq!(outcome.recorded_remotely, behavior == Behavior::Succeed);
        assert_eq!(remote.calls(), 1, "exactly one remote attempt");

        let cached = client.cache().get("1").expect("local entry present");
        assert_eq!(cached.table, TableId::new(5));
        assert_eq!(cached.device_id, client.device_id());
    }
}

#[tokio::test]
async fn test_status_after_remote_check_in_is_remote() {
    let dir = TempDir::new().unwrap();
    let remote = MockRemote::new(Behavior::Succeed);
    let client = client_with(&dir, &remote);
    let g = guest("1", "Nguyen Van A", 5);

    client.record_check_in(&g).await.unwrap();
    let status = client.get_status(&g).await;
    assert!(status.checked_in);
    assert_eq!(status.source, StatusSource::Remote);
    assert!(status.checked_in_at_utc.is_some());
}

#[tokio::test]
async fn test_status_falls_back_to_local_when_remote_down() {
    let dir = TempDir::new().unwrap();
    let remote = MockRemote::new(Behavior::Fail);
    let client = client_with(&dir, &remote);
    let g = guest("1", "Nguyen Van A", 5);

    client.record_check_in(&g).await.unwrap();
    let status = client.get_status(&g).await;
    assert!(status.checked_in);
    assert_eq!(status.source, StatusSource::Local);

    let other = guest("2", "Tran Thi B", 5);
    let status = client.get_status(&other).await;
    assert!(!status.checked_in);
    assert_eq!(status.source, StatusSource::None);
}

#[tokio::test]
async fn test_remote_negative_overrides_local_record() {
    let dir = TempDir::new().unwrap();
    let remote = MockRemote::new(Behavior::Fail);
    let client = client_with(&dir, &remote);
    let g = guest("1", "Nguyen Van A", 5);

    // Saved locally only, the remote never saw it.
    client.record_check_in(&g).await.unwrap();

    remote.set_behavior(Behavior::Succeed);
    let status = client.get_status(&g).await;
    assert!(!status.checked_in);
    assert_eq!(status.source, StatusSource::Remote);
}

#[tokio::test]
async fn test_rejected_status_falls_back_to_local() {
    let dir = TempDir::new().unwrap();
    let remote = MockRemote::new(Behavior::Reject);
    let client = client_with(&dir, &remote);
    let g = guest("1", "Nguyen Van A", 5);

    client.record_check_in(&g).await.unwrap();
    let status = client.get_status(&g).await;
    assert_eq!(status.source, StatusSource::Local);
}

#[tokio::test]
async fn test_timeout_falls_back_to_local() {
    let dir = TempDir::new().unwrap();
    let remote = MockRemote::new(Behavior::Hang);
    let client = client_with(&dir, &remote);
    let g = guest("1", "Nguyen Van A", 5);

    let started = std::time::Instant::now();
    let status = client.get_status(&g).await;
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(status.source, StatusSource::None);
}

#[tokio::test]
async fn test_table_status_online_and_offline() {
    let dir = TempDir::new().unwrap();
    let remote = MockRemote::new(Behavior::Succeed);
    let client = client_with(&dir, &remote);

    let empty = client.get_table_status(TableId::new(5)).await;
    assert!(!empty.offline);
    assert!(empty.check_ins.is_empty());

    client
        .record_check_in(&guest("1", "Nguyen Van A", 5))
        .await
        .unwrap();
    client
        .record_check_in(&guest("2", "Tran Thi B", 6))
        .await
        .unwrap();

    let table = client.get_table_status(TableId::new(5)).await;
    assert!(!table.offline);
    assert_eq!(table.check_ins.len(), 1);
    assert_eq!(table.check_ins[0].guest_name, "Nguyen Van A");

    remote.set_behavior(Behavior::Fail);
    let table = client.get_table_status(TableId::new(5)).await;
    assert!(table.offline);
    assert!(table.check_ins.is_empty());
}

#[tokio::test]
async fn test_combined_status_uses_single_call() {
    let dir = TempDir::new().unwrap();
    let remote = MockRemote::new(Behavior::Succeed);
    let client = client_with(&dir, &remote);
    let g = guest("1", "Nguyen Van A", 5);

    client.record_check_in(&g).await.unwrap();
    let before = remote.calls();

    let status = client.get_guest_and_table_status(&g).await;
    assert_eq!(remote.calls(), before + 1);
    assert!(status.guest.checked_in);
    assert_eq!(status.guest.source, StatusSource::Remote);
    // Timestamp recovered from the table list
    assert!(status.guest.checked_in_at_utc.is_some());
    assert_eq!(status.table.check_ins.len(), 1);
}

#[tokio::test]
async fn test_separate_status_calls_when_combined_disabled() {
    let dir = TempDir::new().unwrap();
    let remote = MockRemote::new(Behavior::Succeed);
    let config = ClientConfig::offline()
        .with_cache_dir(dir.path())
        .with_timeout(Duration::from_millis(100))
        .with_combined_status(false);
    let client =
        CheckInClient::with_remote(&config, Some(remote.clone() as Arc<dyn RemoteCheckIn>));
    let g = guest("1", "Nguyen Van A", 5);

    let status = client.get_guest_and_table_status(&g).await;
    assert_eq!(remote.calls(), 2);
    assert!(!status.guest.checked_in);
    assert!(!status.table.offline);
}

#[tokio::test]
async fn test_combined_status_offline() {
    let dir = TempDir::new().unwrap();
    let remote = MockRemote::new(Behavior::Fail);
    let client = client_with(&dir, &remote);
    let g = guest("1", "Nguyen Van A", 5);

    client.record_check_in(&g).await.unwrap();
    let status = client.get_guest_and_table_status(&g).await;
    assert_eq!(status.guest.source, StatusSource::Local);
    assert!(status.table.offline);
}

#[tokio::test]
async fn test_local_write_failure_is_an_error() {
    let dir = TempDir::new().unwrap();
    let remote = MockRemote::new(Behavior::Fail);
    let client = client_with(&dir, &remote);

    // Replace the cache file with a directory so every write fails.
    let path = client.cache().path().to_path_buf();
    let _ = std::fs::remove_file(&path);
    std::fs::create_dir_all(&path).unwrap();

    let err = client
        .record_check_in(&guest("1", "Nguyen Van A", 5))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Cache(_)));

    // With the remote up, the check-in still counts.
    remote.set_behavior(Behavior::Succeed);
    let outcome = client
        .record_check_in(&guest("1", "Nguyen Van A", 5))
        .await
        .unwrap();
    assert!(outcome.recorded_remotely);
    assert!(!outcome.recorded_locally);
}

#[tokio::test]
async fn test_debug_list_and_clear() {
    let dir = TempDir::new().unwrap();
    let remote = MockRemote::new(Behavior::Succeed);
    let client = client_with(&dir, &remote);

    client
        .record_check_in(&guest("1", "Nguyen Van A", 5))
        .await
        .unwrap();
    client
        .record_check_in(&guest("2", "Tran Thi B", 6))
        .await
        .unwrap();
    assert_eq!(client.local_check_ins().len(), 2);

    assert_eq!(client.clear_local_check_ins().unwrap(), 2);
    assert!(client.local_check_ins().is_empty());

    let reopened = LocalCache::open(dir.path());
    assert!(reopened.list().is_empty());
}

#[tokio::test]
async fn test_device_id_survives_restart() {
    let dir = TempDir::new().unwrap();
    let remote = MockRemote::new(Behavior::Succeed);
    let first = client_with(&dir, &remote).device_id().to_string();
    let second = client_with(&dir, &remote).device_id().to_string();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_status_without_flag_falls_back_to_local() {
    let dir = TempDir::new().unwrap();
    let remote = MockRemote::new(Behavior::Fail);
    let client = client_with(&dir, &remote);
    let g = guest("1", "Nguyen Van A", 5);

    client.record_check_in(&g).await.unwrap();

    remote.set_behavior(Behavior::Malformed);
    let status = client.get_status(&g).await;
    assert!(status.checked_in);
    assert_eq!(status.source, StatusSource::Local);

    let status = client.get_guest_and_table_status(&g).await;
    assert!(status.guest.checked_in);
    assert_eq!(status.guest.source, StatusSource::Local);
}

#[tokio::test]
async fn test_rejected_combined_action_uses_separate_calls() {
    let dir = TempDir::new().unwrap();
    let remote = MockRemote::new(Behavior::Succeed);
    remote.legacy.store(true, Ordering::SeqCst);
    let client = client_with(&dir, &remote);
    let g = guest("1", "Nguyen Van A", 5);

    client.record_check_in(&g).await.unwrap();
    let before = remote.calls();

    let status = client.get_guest_and_table_status(&g).await;
    assert_eq!(remote.calls(), before + 3);
    assert!(status.guest.checked_in);
    assert_eq!(status.guest.source, StatusSource::Remote);
    assert!(!status.table.offline);
    assert_eq!(status.table.check_ins.len(), 1);
}

#[tokio::test]
async fn test_unwritable_cache_does_not_block_startup() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("cache");
    std::fs::write(&blocker, "not a directory").unwrap();

    let config = ClientConfig::offline()
        .with_cache_dir(blocker.clone())
        .with_timeout(Duration::from_millis(100));
    let client = CheckInClient::new(&config).unwrap();
    assert!(client.device_id().starts_with("device_"));
    let g = guest("1", "Nguyen Van A", 5);

    let status = client.get_guest_and_table_status(&g).await;
    assert_eq!(status.guest.source, StatusSource::None);
    assert!(status.table.offline);

    let err = client.record_check_in(&g).await.unwrap_err();
    assert!(matches!(err, ClientError::Cache(_)));

    let remote = MockRemote::new(Behavior::Succeed);
    let client =
        CheckInClient::with_remote(&config, Some(remote.clone() as Arc<dyn RemoteCheckIn>));
    let outcome = client.record_check_in(&g).await.unwrap();
    assert!(outcome.recorded_remotely);
    assert!(!outcome.recorded_locally);
    assert_eq!(client.get_status(&g).await.source, StatusSource::Remote);
}
