pub mod descriptor;
pub mod snapshot_proxy;
pub mod url_resolver;

pub use descriptor::{WebcamCompat, WebcamDescriptor, WebcamExtras};
pub use snapshot_proxy::{ReqwestTransport, SnapshotChunks, SnapshotProxy, SnapshotTransport};
