use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("File I/O Error: {0}")]
    Io(String),

    #[error("Capture Error: {0}")]
    Capture(#[from] CaptureError),
}

// Allow conversion from std::io::Error to AppError::Io
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

/// Failure of a single snapshot capture. Never retried internally.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The streamer answered, but not with a success status.
    #[error("upstream status {status} from {url}")]
    UpstreamStatus { status: u16, url: String },

    /// Connection refused, DNS failure, timeout, TLS validation failure or a
    /// broken body read.
    #[error("request failed for {url}: {cause}")]
    RequestFailed { url: String, cause: String },
}

impl CaptureError {
    pub fn reason(&self) -> &'static str {
        match self {
            CaptureError::UpstreamStatus { .. } => "upstream status",
            CaptureError::RequestFailed { .. } => "request failed",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            CaptureError::UpstreamStatus { status, .. } => Some(*status),
            CaptureError::RequestFailed { .. } => None,
        }
    }

    pub fn request_failed(url: &str, cause: impl std::fmt::Display) -> Self {
        CaptureError::RequestFailed {
            url: url.to_string(),
            cause: cause.to_string(),
        }
    }
}
