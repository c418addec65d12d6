use anyhow::{bail, Context, Result};
use camstreamer_control::cli;
use camstreamer_control::common::logging_setup;
use camstreamer_control::config_loader;
use camstreamer_control::core::provider::{CameraStreamerProvider, WebcamProvider};
use camstreamer_control::operations::{diagnostic_op, resolve_op, snapshot_op, webcams_op};
use log::{debug, error, info};
use std::sync::{Arc, RwLock};
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<()> {
    let main_start_time = Instant::now();
    let matches = cli::build_cli().get_matches();

    let config_path = matches
        .get_one::<String>("config")
        .map(|s| s.as_str())
        .unwrap_or("config/camstreamer.yaml");

    let master_config = match config_loader::load_config(config_path) {
        Ok(cfg) => {
            logging_setup::initialize_logging(Some(&cfg), &matches);
            info!("✅ Configuration loaded from: {}", config_path);
            cfg
        }
        Err(e) => {
            logging_setup::initialize_logging(None, &matches);
            error!(
                "❌ Failed to load master configuration from '{}': {:#}. Exiting.",
                config_path, e
            );
            return Err(e);
        }
    };

    let settings = Arc::new(RwLock::new(master_config.plugin.clone()));
    let provider = Arc::new(CameraStreamerProvider::new(&master_config.app_settings, settings));
    debug!("Provider '{}' ready.", provider.identifier());

    let Some((operation_name, sub_matches)) = matches.subcommand() else {
        info!("🤔 No subcommand provided. Try --help.");
        return Ok(());
    };

    debug!("🎬 Dispatching to subcommand: {}", operation_name);
    let op_start_time = Instant::now();
    let op_result: Result<()> = match operation_name {
        "webcams" => webcams_op::handle_webcams_cli(&*provider, sub_matches),
        "resolve" => resolve_op::handle_resolve_cli(&provider.current_config(), sub_matches),
        "snapshot" => {
            let app_settings = &master_config.app_settings;
            snapshot_op::handle_snapshot_cli(app_settings, provider.clone(), sub_matches).await
        }
        "test" => {
            let config = provider.current_config();
            diagnostic_op::handle_diagnostic_cli(&config, provider.clone(), sub_matches).await
        }
        other => bail!("Subcommand '{}' not implemented.", other),
    };

    op_result.with_context(|| {
        format!("Operation '{}' failed after {:?}", operation_name, op_start_time.elapsed())
    })?;
    info!("🏁 '{}' finished in {:?}.", operation_name, main_start_time.elapsed());
    Ok(())
}
