//! Local check-in cache
//!
//! A JSON file holding the last-known check-in per guest id plus this
//! device's identifier.

mod device;
mod storage;

pub use device::generate_device_id;
pub use storage::{CACHE_FILE_NAME, LocalCache};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
