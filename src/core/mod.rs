pub mod provider;

pub use provider::{CameraStreamerProvider, WebcamProvider};
