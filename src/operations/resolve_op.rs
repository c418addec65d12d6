use crate::common::timestamp_utils;
use crate::stream_config::{StreamConfig, StreamMode};
use crate::streamer::url_resolver::{resolve, with_cache_buster};
use anyhow::{anyhow, Result};
use clap::ArgMatches;
use log::debug;

/// Resolved URL for `mode`, cache-busted when it is an MJPEG stream and the
/// setting asks for it.
pub fn resolve_for_display(config: &StreamConfig, mode: StreamMode, token: i64) -> String {
    let url = resolve(&config.base_url, mode, config);
    if mode == StreamMode::Mjpg && config.mjpg_cache_buster {
        with_cache_buster(&url, token)
    } else {
        url
    }
}

pub fn handle_resolve_cli(config: &StreamConfig, args: &ArgMatches) -> Result<()> {
    let mode = match args.get_one::<String>("mode") {
        Some(raw) => raw.parse::<StreamMode>().map_err(|e| anyhow!(e))?,
        None => config.mode,
    };
    debug!("Resolving URL for mode '{}' against base '{}'", mode, config.base_url);
    println!("{}", resolve_for_display(config, mode, timestamp_utils::cache_buster_token()));
    Ok(())
}
