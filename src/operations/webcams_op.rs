use crate::core::provider::WebcamProvider;
use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{debug, info};

pub fn render_webcams(provider: &dyn WebcamProvider, as_json: bool) -> Result<String> {
    let webcams = provider.get_webcam_configurations();
    debug!("Rendering {} webcam descriptor(s) for '{}'", webcams.len(), provider.identifier());
    if as_json {
        serde_json::to_string_pretty(&webcams)
            .context("Failed to serialize webcam descriptors as JSON")
    } else {
        serde_yaml::to_string(&webcams).context("Failed to serialize webcam descriptors as YAML")
    }
}

pub fn handle_webcams_cli(provider: &dyn WebcamProvider, args: &ArgMatches) -> Result<()> {
    let rendered = render_webcams(provider, args.get_flag("json"))?;
    println!("{}", rendered);
    info!("🎥 Listed webcams for '{}'.", provider.identifier());
    Ok(())
}
