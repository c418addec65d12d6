use chrono::{DateTime, Local, Utc};

// Get current local timestamp as a formatted string
pub fn current_local_timestamp_str(format_str: &str) -> String {
    let now: DateTime<Local> = Local::now();
    now.format(format_str).to_string()
}

/// Millisecond token for MJPEG cache busting.
pub fn cache_buster_token() -> i64 {
    Utc::now().timestamp_millis()
}
