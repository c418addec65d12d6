use log::debug;
use std::path::{Path, PathBuf};

/// Install locations of the streamer binary, newest packaging first. Early
/// images built it from source into /usr/local; later ones ship it via apt.
pub const INSTALL_PATHS: [&str; 2] = ["usr/bin/camera-streamer", "usr/local/bin/camera-streamer"];

/// Where the streamer binary was found under `root`, if anywhere.
pub fn installed_at(root: &Path) -> Option<PathBuf> {
    INSTALL_PATHS.iter().map(|relative| root.join(relative)).find(|candidate| {
        let present = candidate.is_file();
        debug!("Checked for camera-streamer at {}: {}", candidate.display(), present);
        present
    })
}

pub fn detect_installation() -> Option<PathBuf> {
    installed_at(Path::new("/"))
}
