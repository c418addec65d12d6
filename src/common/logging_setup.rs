use crate::config_loader::MasterConfig;
use env_logger::Builder;
use log::LevelFilter;

/// Level from `--debug`, then the config file, then `info`.
pub fn resolve_level(config: Option<&MasterConfig>, debug_flag: bool) -> LevelFilter {
    let log_level_str = if debug_flag {
        "debug".to_string()
    } else {
        config
            .and_then(|c| c.app_settings.log_level.clone())
            .unwrap_or_else(|| "info".to_string())
    };

    match log_level_str.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "off" => LevelFilter::Off,
        s => {
            eprintln!("Unrecognized log level '{}', defaulting to info.", s);
            LevelFilter::Info
        }
    }
}

pub fn initialize_logging(config: Option<&MasterConfig>, cli_matches: &clap::ArgMatches) {
    let mut builder = Builder::new();
    builder.filter_level(resolve_level(config, cli_matches.get_flag("debug")));

    builder.try_init().unwrap_or_else(|e| {
        eprintln!("Failed to initialize logger: {}. Logging might not work as expected.", e);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_loader::parse_config;

    #[test]
    fn debug_flag_beats_config() {
        let config = parse_config("application:\n  log_level: warn\n").unwrap();
        assert_eq!(resolve_level(Some(&config), true), LevelFilter::Debug);
        assert_eq!(resolve_level(Some(&config), false), LevelFilter::Warn);
    }

    #[test]
    fn falls_back_to_info() {
        assert_eq!(resolve_level(None, false), LevelFilter::Info);
        let config = parse_config("application:\n  log_level: chatty\n").unwrap();
        assert_eq!(resolve_level(Some(&config), false), LevelFilter::Info);
    }
}
