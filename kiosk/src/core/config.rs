use crate::floor_plan::HighlightIntensity;
use checkin_client::ClientConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Kiosk configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | KIOSK_GUESTS | data/guests.json | Guest dataset |
/// | KIOSK_TABLES | data/tables.json | Table layout dataset |
/// | KIOSK_ENDPOINT_URL | (unset) | Remote check-in endpoint; unset runs offline |
/// | KIOSK_CACHE_DIR | .kiosk | Local check-in cache directory |
/// | KIOSK_TIMEOUT_SECS | 10 | Remote call timeout |
/// | KIOSK_COMBINED_STATUS | true | Use the combined guest + table status action |
/// | KIOSK_DEBOUNCE_MS | 150 | Autocomplete quiet period |
/// | KIOSK_HIGHLIGHT | high | Table highlight intensity (low, medium, high) |
/// | LOG_LEVEL | info | Log filter |
/// | LOG_DIR | (unset) | Write logs to daily files in this directory |
#[derive(Debug, Clone)]
pub struct Config {
    pub guests_path: PathBuf,
    pub tables_path: PathBuf,
    pub endpoint_url: Option<String>,
    pub cache_dir: PathBuf,
    pub timeout_secs: u64,
    pub combined_status: bool,
    pub debounce_ms: u64,
    pub highlight: HighlightIntensity,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            guests_path: std::env::var("KIOSK_GUESTS")
                .unwrap_or_else(|_| "data/guests.json".into())
                .into(),
            tables_path: std::env::var("KIOSK_TABLES")
                .unwrap_or_else(|_| "data/tables.json".into())
                .into(),
            endpoint_url: std::env::var("KIOSK_ENDPOINT_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            cache_dir: std::env::var("KIOSK_CACHE_DIR")
                .unwrap_or_else(|_| checkin_client::config::DEFAULT_CACHE_DIR.into())
                .into(),
            timeout_secs: std::env::var("KIOSK_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            combined_status: std::env::var("KIOSK_COMBINED_STATUS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            debounce_ms: std::env::var("KIOSK_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(150),
            highlight: std::env::var("KIOSK_HIGHLIGHT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Check-in client settings derived from this configuration
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint_url: self.endpoint_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            cache_dir: self.cache_dir.clone(),
            prefer_combined_status: self.combined_status,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
