use crate::app_config::ApplicationConfig;
use crate::errors::CaptureError;
use crate::settings::YamlSettings;
use crate::stream_config::StreamConfig;
use crate::streamer::descriptor::{self, WebcamDescriptor};
use crate::streamer::snapshot_proxy::{
    ReqwestTransport, SnapshotChunks, SnapshotProxy, SnapshotTransport,
};
use log::debug;
use std::sync::{Arc, PoisonError, RwLock};

/// What the host registers: a source of webcam descriptors plus the handler
/// for its snapshot hook.
pub trait WebcamProvider: Send + Sync {
    fn identifier(&self) -> &str;

    fn get_webcam_configurations(&self) -> Vec<WebcamDescriptor>;

    /// `webcam_name` is whatever the host passes along with the hook call;
    /// a provider with a single camera may ignore it. The chunks keep the
    /// provider's capture lock until they are drained or dropped.
    fn take_webcam_snapshot(&self, webcam_name: &str) -> Result<SnapshotChunks<'_>, CaptureError>;
}

/// Single-camera provider for an external camera-streamer process.
pub struct CameraStreamerProvider<T: SnapshotTransport = ReqwestTransport> {
    identifier: String,
    display_name: String,
    settings: Arc<RwLock<YamlSettings>>,
    proxy: SnapshotProxy<T>,
}

impl CameraStreamerProvider<ReqwestTransport> {
    pub fn new(app_settings: &ApplicationConfig, settings: Arc<RwLock<YamlSettings>>) -> Self {
        Self::with_transport(app_settings, settings, ReqwestTransport)
    }
}

impl<T: SnapshotTransport> CameraStreamerProvider<T> {
    pub fn with_transport(
        app_settings: &ApplicationConfig,
        settings: Arc<RwLock<YamlSettings>>,
        transport: T,
    ) -> Self {
        CameraStreamerProvider {
            identifier: app_settings.identifier.clone(),
            display_name: app_settings.display_name.clone(),
            settings,
            proxy: SnapshotProxy::with_transport(transport),
        }
    }

    /// Handle the host writes settings updates through.
    pub fn settings(&self) -> Arc<RwLock<YamlSettings>> {
        Arc::clone(&self.settings)
    }

    /// Fresh view of the settings; nothing is cached between calls.
    pub fn current_config(&self) -> StreamConfig {
        let settings = self.settings.read().unwrap_or_else(PoisonError::into_inner);
        StreamConfig::from_settings(&*settings)
    }
}

impl<T: SnapshotTransport> WebcamProvider for CameraStreamerProvider<T> {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn get_webcam_configurations(&self) -> Vec<WebcamDescriptor> {
        let config = self.current_config();
        vec![descriptor::build(&config, &self.identifier, &self.display_name)]
    }

    fn take_webcam_snapshot(&self, webcam_name: &str) -> Result<SnapshotChunks<'_>, CaptureError> {
        debug!("Snapshot hook called for webcam '{}'", webcam_name);
        let config = self.current_config();
        self.proxy.capture(&config)
    }
}
