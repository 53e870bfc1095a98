//! Logging Infrastructure

use std::path::Path;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "kiosk=info,checkin_client=info";

/// Initialize the logger
///
/// `RUST_LOG` wins over `level`. Logs go to stderr, or to a daily rolling
/// file when `log_dir` names an existing directory.
pub fn init_logger(level: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| match level {
            Some(level) => EnvFilter::try_new(format!(
                "kiosk={level},checkin_client={level},shared={level}"
            )),
            None => EnvFilter::try_new(DEFAULT_FILTER),
        })
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "kiosk");
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
    }

    subscriber.with_writer(std::io::stderr).init();
}
