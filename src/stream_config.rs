use crate::settings::SettingsSource;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "/webcam/";
pub const DEFAULT_STUN_URL: &str = "stun:stun.l.google.com:19302";
pub const DEFAULT_STREAM_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_SNAPSHOT_TIMEOUT_SECS: u64 = 5;

/// Live-view protocol the user prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamMode {
    #[default]
    Webrtc,
    Mjpg,
    Snapshot,
}

impl StreamMode {
    pub const ALL: [StreamMode; 3] =
        [StreamMode::Webrtc, StreamMode::Mjpg, StreamMode::Snapshot];

    pub fn as_str(&self) -> &'static str {
        match self {
            StreamMode::Webrtc => "webrtc",
            StreamMode::Mjpg => "mjpg",
            StreamMode::Snapshot => "snapshot",
        }
    }
}

impl fmt::Display for StreamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "webrtc" => Ok(StreamMode::Webrtc),
            "mjpg" | "mjpeg" => Ok(StreamMode::Mjpg),
            "snapshot" => Ok(StreamMode::Snapshot),
            other => Err(format!("unknown stream mode '{}'", other)),
        }
    }
}

/// Per-protocol path segments appended to the base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPaths {
    pub webrtc: String,
    pub mjpg: String,
    pub snapshot: String,
}

impl SubPaths {
    pub fn for_mode(&self, mode: StreamMode) -> &str {
        match mode {
            StreamMode::Webrtc => &self.webrtc,
            StreamMode::Mjpg => &self.mjpg,
            StreamMode::Snapshot => &self.snapshot,
        }
    }
}

impl Default for SubPaths {
    fn default() -> Self {
        SubPaths {
            webrtc: "webrtc".to_string(),
            mjpg: "stream".to_string(),
            snapshot: "snapshot".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    pub mode: StreamMode,
    pub base_url: String,
    pub sub_paths: SubPaths,
    pub show_warning: bool,
    pub flip_h: bool,
    pub flip_v: bool,
    pub rotate_90: bool,
    pub stream_timeout: u64,
    pub webrtc_stun_url: String,
    pub mjpg_cache_buster: bool,
    pub snapshot_timeout: u64,
    pub snapshot_validate_ssl: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            mode: StreamMode::Webrtc,
            base_url: DEFAULT_BASE_URL.to_string(),
            sub_paths: SubPaths::default(),
            show_warning: true,
            flip_h: false,
            flip_v: false,
            rotate_90: false,
            stream_timeout: DEFAULT_STREAM_TIMEOUT_SECS,
            webrtc_stun_url: DEFAULT_STUN_URL.to_string(),
            mjpg_cache_buster: false,
            snapshot_timeout: DEFAULT_SNAPSHOT_TIMEOUT_SECS,
            snapshot_validate_ssl: true,
        }
    }
}

fn read_timeout(settings: &dyn SettingsSource, key: &str, default: u64) -> u64 {
    match settings.get_int(key) {
        Some(secs) if secs > 0 => secs as u64,
        Some(secs) => {
            warn!("Timeout {} for '{}' is not positive, using default {}s.", secs, key, default);
            default
        }
        None => default,
    }
}

impl StreamConfig {
    /// Snapshot of the current settings. Absent or unusable keys fall back
    /// to their defaults; this never fails.
    pub fn from_settings(settings: &dyn SettingsSource) -> Self {
        let defaults = StreamConfig::default();

        let mode = match settings.get_str("mode") {
            Some(raw) => raw.parse::<StreamMode>().unwrap_or_else(|e| {
                warn!("{}, falling back to '{}'.", e, defaults.mode);
                defaults.mode
            }),
            None => defaults.mode,
        };

        StreamConfig {
            mode,
            base_url: settings.get_str("url").unwrap_or(defaults.base_url),
            sub_paths: SubPaths {
                webrtc: settings.get_str("webrtc.url").unwrap_or(defaults.sub_paths.webrtc),
                mjpg: settings.get_str("mjpg.url").unwrap_or(defaults.sub_paths.mjpg),
                snapshot: settings.get_str("snapshot.url").unwrap_or(defaults.sub_paths.snapshot),
            },
            show_warning: settings.get_bool("show_warning").unwrap_or(defaults.show_warning),
            flip_h: settings.get_bool("flipH").unwrap_or(defaults.flip_h),
            flip_v: settings.get_bool("flipV").unwrap_or(defaults.flip_v),
            rotate_90: settings.get_bool("rotate90").unwrap_or(defaults.rotate_90),
            stream_timeout: read_timeout(settings, "timeout", defaults.stream_timeout),
            webrtc_stun_url: settings.get_str("webrtc.stun").unwrap_or(defaults.webrtc_stun_url),
            mjpg_cache_buster: settings
                .get_bool("mjpg.cacheBuster")
                .unwrap_or(defaults.mjpg_cache_buster),
            snapshot_timeout: read_timeout(settings, "snapshot.timeout", defaults.snapshot_timeout),
            snapshot_validate_ssl: settings
                .get_bool("snapshot.validate_ssl")
                .unwrap_or(defaults.snapshot_validate_ssl),
        }
    }

    /// The STUN setting may hold several comma-separated servers.
    pub fn ice_servers(&self) -> Vec<String> {
        self.webrtc_stun_url
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}
