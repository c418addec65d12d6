// Shared helpers for the integration tests.
#![allow(dead_code)]

use camstreamer_control::app_config::ApplicationConfig;
use camstreamer_control::{CameraStreamerProvider, StreamConfig, YamlSettings};
use std::sync::{Arc, RwLock};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SNAPSHOT_PATH: &str = "/webcam/snapshot";

/// Settings pointing at `base_url` with the given snapshot timeout.
pub fn settings_for(base_url: &str, snapshot_timeout: i64) -> YamlSettings {
    let mut settings = YamlSettings::new();
    settings.set("url", base_url);
    settings.set("snapshot.url", "snapshot");
    settings.set("snapshot.timeout", snapshot_timeout);
    settings
}

pub fn config_for(base_url: &str, snapshot_timeout: i64) -> StreamConfig {
    StreamConfig::from_settings(&settings_for(base_url, snapshot_timeout))
}

pub fn provider_for(base_url: &str, snapshot_timeout: i64) -> CameraStreamerProvider {
    let settings = Arc::new(RwLock::new(settings_for(base_url, snapshot_timeout)));
    CameraStreamerProvider::new(&ApplicationConfig::default(), settings)
}

/// Mock streamer answering the snapshot endpoint with `response`.
pub async fn start_streamer(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SNAPSHOT_PATH))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

pub fn fake_jpeg(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
