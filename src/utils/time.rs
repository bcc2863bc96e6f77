use chrono::{DateTime, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn to_rfc3339(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Reset markers are stored as the RFC 3339 rendering of the token expiry.
pub fn reset_marker(exp_seconds: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(exp_seconds, 0).map(to_rfc3339)
}
