use crate::common::timestamp_utils;
use crate::errors::AppError;
use log::{debug, warn};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn generate_timestamped_filename(
    base_name: &str,        // e.g. the webcam identifier
    timestamp_format: &str, // from config, e.g. "%Y%m%d_%H%M%S"
    extension: &str,
) -> String {
    let timestamp = timestamp_utils::current_local_timestamp_str(timestamp_format);
    format!("{}_{}.{}", base_name, timestamp, extension)
}

pub fn ensure_output_directory(dir_path_str: &str) -> Result<PathBuf, AppError> {
    let dir_path = PathBuf::from(dir_path_str);
    if !dir_path.exists() {
        debug!(
            "Output directory '{}' does not exist, attempting to create it.",
            dir_path.display()
        );
        std::fs::create_dir_all(&dir_path).map_err(|e| {
            AppError::Io(format!(
                "Failed to create output directory '{}': {}",
                dir_path.display(),
                e
            ))
        })?;
    } else if !dir_path.is_dir() {
        return Err(AppError::Io(format!(
            "Output path '{}' exists but is not a directory.",
            dir_path.display()
        )));
    }
    Ok(dir_path)
}

/// Writes chunks to `path` as they arrive. Returns the byte count. A failed
/// chunk aborts the write and removes the partial file.
pub fn write_chunks<I>(path: &Path, chunks: I) -> Result<usize, AppError>
where
    I: IntoIterator<Item = Result<Vec<u8>, crate::errors::CaptureError>>,
{
    let mut file = File::create(path)
        .map_err(|e| AppError::Io(format!("Failed to create file '{}': {}", path.display(), e)))?;
    let mut written = 0;
    for chunk in chunks {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                drop(file);
                if let Err(remove_err) = std::fs::remove_file(path) {
                    warn!("Failed to remove partial file '{}': {}", path.display(), remove_err);
                }
                return Err(e.into());
            }
        };
        file.write_all(&chunk)
            .map_err(|e| AppError::Io(format!("Failed to write '{}': {}", path.display(), e)))?;
        written += chunk.len();
    }
    file.flush()?;
    Ok(written)
}
