pub mod app_config;
pub mod cli;
pub mod common;
pub mod config_loader;
pub mod core;
pub mod errors;
pub mod installation;
pub mod operations;
pub mod settings;
pub mod stream_config;
pub mod streamer;

pub use crate::core::provider::{CameraStreamerProvider, WebcamProvider};
pub use errors::{AppError, CaptureError};
pub use settings::{SettingsSource, YamlSettings};
pub use stream_config::{StreamConfig, StreamMode, SubPaths};
pub use streamer::descriptor::{build as build_descriptor, WebcamDescriptor};
pub use streamer::snapshot_proxy::{SnapshotChunks, SnapshotProxy, SNAPSHOT_CHUNK_SIZE};
pub use streamer::url_resolver::resolve;
