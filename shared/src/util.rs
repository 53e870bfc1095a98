use chrono::{DateTime, Utc};

/// Current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a remote timestamp if it is RFC 3339
pub fn parse_utc(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Lowercase and trim, the normalization every name comparison uses
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
