use super::CacheError;
use super::device::generate_device_id;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared::models::CheckInRecord;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CACHE_FILE_NAME: &str = "checkins.json";

/// On-disk layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    device_id: Option<String>,
    /// guest id -> last check-in recorded on this device
    #[serde(default)]
    check_ins: BTreeMap<String, CheckInRecord>,
}

/// File-backed check-in cache
///
/// Every mutation is written through to disk before it becomes visible, so
/// a failed write leaves the in-memory view unchanged.
#[derive(Debug)]
pub struct LocalCache {
    file_path: PathBuf,
    data: Mutex<CacheFile>,
}

impl LocalCache {
    /// Open the cache in `dir`, creating nothing until the first write.
    ///
    /// Never fails: an unreadable cache starts empty in memory, and a file
    /// that does not parse is moved aside to `checkins.json.corrupt`. Only
    /// writes report storage errors.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let file_path = dir.as_ref().join(CACHE_FILE_NAME);
        let data = Self::load(&file_path);

        tracing::debug!(path = ?file_path, entries = data.check_ins.len(), "Check-in cache opened");

        Self {
            file_path,
            data: Mutex::new(data),
        }
    }

    fn load(file_path: &Path) -> CacheFile {
        if !file_path.exists() {
            return CacheFile::default();
        }

        let content = match std::fs::read_to_string(file_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = ?file_path, error = %e, "Check-in cache unreadable, starting empty");
                return CacheFile::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(data) => data,
            Err(e) => {
                let backup = file_path.with_extension("json.corrupt");
                tracing::warn!(path = ?file_path, error = %e, "Corrupt check-in cache, moving aside");
                if let Err(e) = std::fs::rename(file_path, &backup) {
                    tracing::warn!(path = ?file_path, error = %e, "Could not move corrupt cache aside");
                }
                CacheFile::default()
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn save(&self, data: &CacheFile) -> Result<(), CacheError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }

    /// Apply `f` to a copy, persist it, then publish it
    fn update<R>(&self, f: impl FnOnce(&mut CacheFile) -> R) -> Result<R, CacheError> {
        let mut guard = self.data.lock();
        let mut next = guard.clone();
        let result = f(&mut next);
        self.save(&next)?;
        *guard = next;
        Ok(result)
    }

    /// Store a check-in, replacing any previous one for the same guest
    pub fn put(&self, record: &CheckInRecord) -> Result<(), CacheError> {
        self.update(|data| {
            data.check_ins
                .insert(record.guest_id.clone(), record.clone());
        })?;
        tracing::debug!(guest_id = %record.guest_id, "Check-in cached locally");
        Ok(())
    }

    pub fn get(&self, guest_id: &str) -> Option<CheckInRecord> {
        self.data.lock().check_ins.get(guest_id).cloned()
    }

    /// All cached check-ins, ordered by guest id
    pub fn list(&self) -> Vec<CheckInRecord> {
        self.data.lock().check_ins.values().cloned().collect()
    }

    /// Remove every cached check-in; the device id is kept.
    /// Returns how many entries were removed.
    pub fn clear(&self) -> Result<usize, CacheError> {
        let removed = self.update(|data| {
            let n = data.check_ins.len();
            data.check_ins.clear();
            n
        })?;
        tracing::info!(removed, "Cleared local check-ins");
        Ok(removed)
    }

    /// This device's identifier, generated and persisted on first use
    ///
    /// When the id cannot be persisted it is kept in memory for this run and
    /// written along with the next successful update.
    pub fn device_id(&self) -> String {
        if let Some(id) = self.data.lock().device_id.clone() {
            return id;
        }

        let id = generate_device_id();
        let persisted = self.update(|data| {
            data.device_id.get_or_insert_with(|| id.clone()).clone()
        });
        match persisted {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(device_id = %id, error = %e, "Device id not persisted, using it in memory");
                self.data
                    .lock()
                    .device_id
                    .get_or_insert_with(|| id.clone())
                    .clone()
            }
        }
    }
}
