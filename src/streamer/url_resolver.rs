use crate::stream_config::{StreamConfig, StreamMode};

/// Origin used when the snapshot base is a bare path on this machine.
pub const LOCALHOST_ORIGIN: &str = "http://127.0.0.1";

fn is_http_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolves the URL for `mode` against `base_url`, with exactly one slash at
/// every join regardless of how either side was entered.
///
/// WebRTC and MJPEG URLs are handed to the browser, so a relative base stays
/// relative. Snapshot URLs are fetched by this process and get pinned to
/// `http://127.0.0.1` unless the base already carries an HTTP scheme.
pub fn resolve(base_url: &str, mode: StreamMode, config: &StreamConfig) -> String {
    let base = base_url.trim_end_matches('/');
    let sub_path = config.sub_paths.for_mode(mode).trim_matches('/');

    match mode {
        StreamMode::Webrtc | StreamMode::Mjpg => format!("{}/{}", base, sub_path),
        StreamMode::Snapshot => {
            if is_http_url(base) {
                format!("{}/{}", base, sub_path)
            } else {
                let local_path = base.trim_start_matches('/');
                if local_path.is_empty() {
                    format!("{}/{}", LOCALHOST_ORIGIN, sub_path)
                } else {
                    format!("{}/{}/{}", LOCALHOST_ORIGIN, local_path, sub_path)
                }
            }
        }
    }
}

/// Appends a `_=<token>` query parameter so browsers refetch MJPEG streams.
pub fn with_cache_buster(url: &str, token: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}_={}", url, separator, token)
}
