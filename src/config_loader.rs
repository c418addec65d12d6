use crate::app_config::ApplicationConfig;
use crate::settings::YamlSettings;
use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::time::Instant;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MasterConfig {
    #[serde(rename = "application", default)]
    pub app_settings: ApplicationConfig,
    /// Plugin settings tree, read fresh into a `StreamConfig` on every use.
    #[serde(default)]
    pub plugin: YamlSettings,
}

pub fn load_config(path: &str) -> Result<MasterConfig> {
    debug!("📄 Attempting to load config from: {}", path);
    let start_time = Instant::now();

    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file '{}'. 📖", path))?;
    let config = parse_config(&config_str)
        .with_context(|| format!("Failed to load configuration from '{}'. 💔", path))?;

    info!(
        "✅ Successfully loaded and validated configuration from '{}' in {:?}",
        path,
        start_time.elapsed()
    );
    Ok(config)
}

pub fn parse_config(text: &str) -> Result<MasterConfig> {
    let config: MasterConfig =
        serde_yaml::from_str(text).context("Failed to parse YAML configuration")?;
    validate_master_config(&config).context("Master configuration validation failed 👎")?;
    Ok(config)
}

// URLs are not checked here; a broken one surfaces at capture time.
fn validate_master_config(config: &MasterConfig) -> Result<()> {
    debug!("🕵️ Validating master configuration...");
    if config.app_settings.identifier.trim().is_empty() {
        bail!("❌ Application identifier cannot be empty.");
    }
    if config.app_settings.display_name.trim().is_empty() {
        bail!("❌ Application display_name cannot be empty.");
    }
    if config.app_settings.image_extension.trim().is_empty() {
        bail!("❌ Application image_extension cannot be empty.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsSource;
    use std::io::Write;

    #[test]
    fn empty_document_sections_take_defaults() {
        let config = parse_config("application: {}\n").unwrap();
        assert_eq!(config.app_settings.identifier, "camerastreamer_control");
        assert_eq!(config.app_settings.display_name, "Camera Streamer");
        assert_eq!(config.plugin.get_str("url"), None);
    }

    #[test]
    fn loads_plugin_tree_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "application:\n  display_name: Bench Cam\n\
             plugin:\n  url: http://cam.local/\n  snapshot:\n    timeout: 4\n"
        )
        .unwrap();
        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.app_settings.display_name, "Bench Cam");
        assert_eq!(config.plugin.get_str("url").as_deref(), Some("http://cam.local/"));
        assert_eq!(config.plugin.get_int("snapshot.timeout"), Some(4));
    }

    #[test]
    fn blank_identifier_is_rejected() {
        let err = parse_config("application:\n  identifier: \"  \"\n").unwrap_err();
        assert!(format!("{:#}", err).contains("identifier"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config("/nonexistent/camstreamer.yaml").unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/camstreamer.yaml"));
    }
}
