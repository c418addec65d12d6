use clap::{Arg, ArgAction, Command};
use log::debug;

pub fn build_cli() -> Command {
    debug!("⚙️ Building CLI interface...");
    Command::new("camstreamer-control")
        .version(env!("CARGO_PKG_VERSION"))
        .about(
            "Exposes an external camera-streamer process as a webcam: \
             resolved stream URLs and relayed snapshots.",
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom configuration file")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("webcams")
                .about("Prints the webcam descriptors handed to the host")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print JSON instead of YAML")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("resolve")
                .about("Prints the resolved URL for one stream mode")
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .value_name("MODE")
                        .help("webrtc, mjpg or snapshot (default: the configured mode)")
                        .value_parser(["webrtc", "mjpg", "snapshot"])
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("snapshot")
                .about("Captures one frame from the streamer and saves it")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("DIR")
                        .help("Output directory for the image")
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("test")
                .about("Runs a diagnostic test suite")
                .arg(
                    Arg::new("burst")
                        .long("burst")
                        .value_name("COUNT")
                        .help("Number of concurrent snapshot captures to fire at the streamer")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("3")
                        .action(ArgAction::Set),
                ),
        )
}
