use crate::app_config::ApplicationConfig;
use crate::common::file_utils;
use crate::core::provider::WebcamProvider;
use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Captures one frame through the provider and writes it to `output_dir`.
/// Blocking; run it off the async executor.
pub fn capture_to_file(
    provider: &dyn WebcamProvider,
    app_settings: &ApplicationConfig,
    output_dir: &str,
) -> Result<PathBuf> {
    let start_time = Instant::now();
    let dir = file_utils::ensure_output_directory(output_dir)?;
    let filename = file_utils::generate_timestamped_filename(
        provider.identifier(),
        &app_settings.filename_timestamp_format,
        &app_settings.image_extension,
    );
    let path = dir.join(filename);

    let chunks = provider
        .take_webcam_snapshot(provider.identifier())
        .with_context(|| format!("Snapshot capture for '{}' failed", provider.identifier()))?;
    let written = file_utils::write_chunks(&path, chunks)
        .with_context(|| format!("Failed to save snapshot to '{}'", path.display()))?;

    info!(
        "✅ Saved snapshot ({} bytes) to {} in {:?}",
        written,
        path.display(),
        start_time.elapsed()
    );
    Ok(path)
}

pub async fn handle_snapshot_cli(
    app_settings: &ApplicationConfig,
    provider: Arc<dyn WebcamProvider>,
    args: &ArgMatches,
) -> Result<()> {
    let output_dir = args
        .get_one::<String>("output")
        .cloned()
        .unwrap_or_else(|| app_settings.output_directory.clone());
    debug!("Snapshot output directory: {}", output_dir);

    let task_settings = app_settings.clone();
    let path = tokio::task::spawn_blocking(move || {
        capture_to_file(provider.as_ref(), &task_settings, &output_dir)
    })
    .await
    .context("Snapshot task panicked or was cancelled")??;
    println!("{}", path.display());
    Ok(())
}
