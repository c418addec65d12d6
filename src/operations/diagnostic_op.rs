use crate::core::provider::WebcamProvider;
use crate::installation;
use crate::stream_config::{StreamConfig, StreamMode};
use crate::streamer::url_resolver::resolve;
use anyhow::{Context, Result};
use clap::ArgMatches;
use futures::future::join_all;
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Instant;

pub struct DiagnosticResult {
    pub test_name: String,
    pub success: bool,
    pub details: String,
}

/// Fires `count` captures at once. The capture lock serializes them, so the
/// total wall time is roughly the sum of the individual requests.
pub async fn run_capture_burst(
    provider: Arc<dyn WebcamProvider>,
    count: usize,
) -> Vec<DiagnosticResult> {
    let tasks = (0..count).map(|i| {
        let provider = Arc::clone(&provider);
        tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let outcome = provider
                .take_webcam_snapshot(provider.identifier())
                .and_then(|chunks| chunks.collect_bytes());
            (i, start.elapsed(), outcome)
        })
    });

    join_all(tasks)
        .await
        .into_iter()
        .enumerate()
        .map(|(slot, joined)| match joined {
            Ok((i, elapsed, Ok(bytes))) => DiagnosticResult {
                test_name: format!("Snapshot capture #{}", i + 1),
                success: true,
                details: format!("{} bytes in {:?}", bytes.len(), elapsed),
            },
            Ok((i, elapsed, Err(e))) => DiagnosticResult {
                test_name: format!("Snapshot capture #{}", i + 1),
                success: false,
                details: format!("{} ({}) after {:?}", e, e.reason(), elapsed),
            },
            Err(join_err) => DiagnosticResult {
                test_name: format!("Snapshot capture #{}", slot + 1),
                success: false,
                details: format!("Task failed: {}", join_err),
            },
        })
        .collect()
}

pub async fn handle_diagnostic_cli(
    config: &StreamConfig,
    provider: Arc<dyn WebcamProvider>,
    args: &ArgMatches,
) -> Result<()> {
    let overall_start = Instant::now();
    info!("🩺 Starting diagnostic test suite...");
    let mut results: Vec<DiagnosticResult> = Vec::new();

    let install_path = tokio::task::spawn_blocking(installation::detect_installation)
        .await
        .context("Installation check task failed")?;
    results.push(match install_path {
        Some(path) => DiagnosticResult {
            test_name: "camera-streamer installed".to_string(),
            success: true,
            details: format!("Found at {}", path.display()),
        },
        None => DiagnosticResult {
            test_name: "camera-streamer installed".to_string(),
            success: false,
            details: "Not found in /usr/bin or /usr/local/bin".to_string(),
        },
    });

    for mode in StreamMode::ALL {
        results.push(DiagnosticResult {
            test_name: format!("Resolve {} URL", mode),
            success: true,
            details: resolve(&config.base_url, mode, config),
        });
    }

    let burst = args.get_one::<usize>("burst").copied().unwrap_or(1).max(1);
    info!("  DIAGNOSTIC: Firing {} concurrent snapshot capture(s)... 📸", burst);
    let burst_start = Instant::now();
    results.extend(run_capture_burst(provider, burst).await);
    info!("  DIAGNOSTIC: Capture burst finished in {:?}", burst_start.elapsed());

    info!("📋 Diagnostic summary:");
    let mut failures = 0;
    for result in &results {
        if result.success {
            info!("  ✅ {}: {}", result.test_name, result.details);
        } else {
            failures += 1;
            error!("  ❌ {}: {}", result.test_name, result.details);
        }
    }
    if failures > 0 {
        warn!("⚠️ {} of {} diagnostic(s) failed.", failures, results.len());
    }
    info!("🏁 Diagnostics finished in {:?}.", overall_start.elapsed());
    Ok(())
}
