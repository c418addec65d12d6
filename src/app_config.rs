use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApplicationConfig {
    pub log_level: Option<String>, // CLI --debug takes precedence
    pub identifier: String,        // webcam name the host selects by
    pub display_name: String,
    pub output_directory: String,
    pub filename_timestamp_format: String, // strftime format string
    pub image_extension: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        ApplicationConfig {
            log_level: Some("info".to_string()),
            identifier: "camerastreamer_control".to_string(),
            display_name: "Camera Streamer".to_string(),
            output_directory: "./output".to_string(),
            filename_timestamp_format: "%Yy%mm%dd%Hh%Mm%Ss".to_string(),
            image_extension: "jpg".to_string(),
        }
    }
}
