use crate::stream_config::{StreamConfig, StreamMode};
use crate::streamer::url_resolver::resolve;
use serde::{Deserialize, Serialize};

/// Aspect ratio older viewers expect. Not configurable.
pub const STREAM_RATIO: &str = "16:9";

/// Fields read by viewers that only understand a single MJPEG stream plus
/// a snapshot URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebcamCompat {
    pub stream: String,
    pub stream_timeout: u64,
    pub stream_ratio: String,
    pub stream_webrtc_ice_servers: Vec<String>,
    pub snapshot: String,
    pub snapshot_timeout: u64,
    pub snapshot_ssl_validation: bool,
    pub cache_buster: bool,
}

/// Fields read by mode-aware viewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebcamExtras {
    pub mode: StreamMode,
    pub url: String,
    pub stun: String,
    pub cache_buster: bool,
    pub show_warning: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebcamDescriptor {
    pub name: String,
    pub display_name: String,
    pub can_snapshot: bool,
    #[serde(rename = "snapshotDisplay")]
    pub snapshot_display_url: String,
    #[serde(rename = "flipH")]
    pub flip_h: bool,
    #[serde(rename = "flipV")]
    pub flip_v: bool,
    #[serde(rename = "rotate90")]
    pub rotate_90: bool,
    pub compat: WebcamCompat,
    pub extras: WebcamExtras,
}

pub fn build(config: &StreamConfig, name: &str, display_name: &str) -> WebcamDescriptor {
    let snapshot_url = resolve(&config.base_url, StreamMode::Snapshot, config);
    let preferred_url = resolve(&config.base_url, config.mode, config);
    // MJPEG-only viewers always get the MJPEG path, whatever mode is preferred.
    let stream_url = resolve(&config.base_url, StreamMode::Mjpg, config);

    WebcamDescriptor {
        name: name.to_string(),
        display_name: display_name.to_string(),
        can_snapshot: true,
        snapshot_display_url: snapshot_url.clone(),
        flip_h: config.flip_h,
        flip_v: config.flip_v,
        rotate_90: config.rotate_90,
        compat: WebcamCompat {
            stream: stream_url,
            stream_timeout: config.stream_timeout,
            stream_ratio: STREAM_RATIO.to_string(),
            stream_webrtc_ice_servers: config.ice_servers(),
            snapshot: snapshot_url,
            snapshot_timeout: config.snapshot_timeout,
            snapshot_ssl_validation: config.snapshot_validate_ssl,
            cache_buster: config.mjpg_cache_buster,
        },
        extras: WebcamExtras {
            mode: config.mode,
            url: preferred_url,
            stun: config.webrtc_stun_url.clone(),
            cache_buster: config.mjpg_cache_buster,
            show_warning: config.show_warning,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_display_matches_compat_snapshot() {
        for base in ["/webcam/", "webcam", "http://cam.local:8080/", ""] {
            let mut config = StreamConfig::default();
            config.base_url = base.to_string();
            config.sub_paths.snapshot = "/snap/".to_string();
            let descriptor = build(&config, "cam", "Cam");
            assert_eq!(descriptor.snapshot_display_url, descriptor.compat.snapshot);
        }
    }

    #[test]
    fn compat_stream_is_always_mjpg() {
        for mode in StreamMode::ALL {
            let mut config = StreamConfig::default();
            config.mode = mode;
            let descriptor = build(&config, "cam", "Cam");
            assert_eq!(descriptor.compat.stream, "/webcam/stream");
            assert_eq!(descriptor.extras.mode, mode);
        }
    }

    #[test]
    fn extras_follow_preferred_mode() {
        let mut config = StreamConfig::default();
        config.base_url = "http://cam.local:8080/".to_string();
        let descriptor = build(&config, "cam", "Cam");
        assert_eq!(descriptor.extras.url, "http://cam.local:8080/webrtc");

        config.mode = StreamMode::Snapshot;
        let descriptor = build(&config, "cam", "Cam");
        assert_eq!(descriptor.extras.url, "http://cam.local:8080/snapshot");
    }

    #[test]
    fn passes_orientation_and_timeouts_through() {
        let mut config = StreamConfig::default();
        config.flip_v = true;
        config.rotate_90 = true;
        config.stream_timeout = 11;
        config.snapshot_timeout = 3;
        config.snapshot_validate_ssl = false;
        config.webrtc_stun_url = "stun:a:1,stun:b:2".to_string();
        config.show_warning = false;
        let descriptor = build(&config, "camerastreamer_control", "Camera Streamer");

        assert!(descriptor.can_snapshot);
        assert!(!descriptor.flip_h && descriptor.flip_v && descriptor.rotate_90);
        assert_eq!(descriptor.compat.stream_timeout, 11);
        assert_eq!(descriptor.compat.snapshot_timeout, 3);
        assert!(!descriptor.compat.snapshot_ssl_validation);
        assert_eq!(descriptor.compat.stream_ratio, "16:9");
        assert_eq!(descriptor.compat.stream_webrtc_ice_servers, vec!["stun:a:1", "stun:b:2"]);
        assert_eq!(descriptor.extras.stun, "stun:a:1,stun:b:2");
        assert!(!descriptor.extras.show_warning);
    }

    #[test]
    fn serializes_with_host_field_names() {
        let descriptor = build(&StreamConfig::default(), "cam", "Cam");
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["displayName"], "Cam");
        assert_eq!(json["canSnapshot"], true);
        assert_eq!(json["snapshotDisplay"], "http://127.0.0.1/webcam/snapshot");
        assert_eq!(json["flipH"], false);
        assert_eq!(json["compat"]["streamRatio"], "16:9");
        assert_eq!(json["compat"]["snapshotSslValidation"], true);
        assert_eq!(json["extras"]["mode"], "webrtc");
        assert_eq!(json["extras"]["url"], "/webcam/webrtc");
        assert_eq!(json["extras"]["showWarning"], true);
    }
}
