use crate::errors::CaptureError;
use crate::stream_config::{StreamConfig, StreamMode};
use crate::streamer::url_resolver::resolve;
use log::{debug, error, info};
use reqwest::blocking::Client;
use std::io::{ErrorKind, Read};
use std::iter::FusedIterator;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

pub const SNAPSHOT_CHUNK_SIZE: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRequest {
    pub url: String,
    pub timeout: Duration,
    pub validate_ssl: bool,
}

/// Status line and unread body of an upstream response.
pub struct TransportResponse {
    pub status: u16,
    pub body: Box<dyn Read + Send>,
}

/// The outbound GET against the streamer. Implementations must honor the
/// request's timeout and TLS-validation flag.
pub trait SnapshotTransport: Send + Sync {
    fn get(&self, request: &SnapshotRequest) -> Result<TransportResponse, CaptureError>;
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Blocking reqwest client, built per request since timeout and TLS
/// validation can change with every settings update.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport;

impl SnapshotTransport for ReqwestTransport {
    fn get(&self, request: &SnapshotRequest) -> Result<TransportResponse, CaptureError> {
        let client = Client::builder()
            .timeout(request.timeout)
            .danger_accept_invalid_certs(!request.validate_ssl)
            .build()
            .map_err(|e| CaptureError::request_failed(&request.url, error_chain(&e)))?;

        let response = client
            .get(&request.url)
            .send()
            .map_err(|e| CaptureError::request_failed(&request.url, error_chain(&e)))?;

        Ok(TransportResponse {
            status: response.status().as_u16(),
            body: Box::new(response),
        })
    }
}

/// Relays single frames from the streamer, one capture at a time.
pub struct SnapshotProxy<T: SnapshotTransport = ReqwestTransport> {
    transport: T,
    capture_lock: Mutex<()>,
}

impl SnapshotProxy<ReqwestTransport> {
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport)
    }
}

impl Default for SnapshotProxy<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SnapshotTransport> SnapshotProxy<T> {
    pub fn with_transport(transport: T) -> Self {
        SnapshotProxy {
            transport,
            capture_lock: Mutex::new(()),
        }
    }

    /// Fetches one frame from the snapshot endpoint.
    ///
    /// The capture lock is taken before the outbound GET and travels with
    /// the returned chunks. It is released once the body has been drained,
    /// has failed, or the chunks are dropped; until then every other
    /// caller blocks.
    pub fn capture(&self, config: &StreamConfig) -> Result<SnapshotChunks<'_>, CaptureError> {
        let url = resolve(&config.base_url, StreamMode::Snapshot, config);
        let request = SnapshotRequest {
            url: url.clone(),
            timeout: Duration::from_secs(config.snapshot_timeout),
            validate_ssl: config.snapshot_validate_ssl,
        };

        let wait_start = Instant::now();
        // The lock guards no data, so a poisoned lock is still usable.
        let guard = self.capture_lock.lock().unwrap_or_else(PoisonError::into_inner);
        debug!("Acquired snapshot capture lock after {:?}", wait_start.elapsed());

        let request_start = Instant::now();
        info!("📸 Requesting snapshot from {}", url);
        let response = self.transport.get(&request).map_err(|e| {
            error!(
                "❌ Snapshot request to {} failed after {:?}: {}",
                url,
                request_start.elapsed(),
                e
            );
            e
        })?;

        if !(200..300).contains(&response.status) {
            error!("❌ Snapshot request to {} returned status {}", url, response.status);
            return Err(CaptureError::UpstreamStatus {
                status: response.status,
                url,
            });
        }
        debug!(
            "Snapshot response from {} (status {}) in {:?}",
            url,
            response.status,
            request_start.elapsed()
        );

        Ok(SnapshotChunks::new(response.body, url, SNAPSHOT_CHUNK_SIZE, Some(guard)))
    }
}

/// Forward-only sequence of body chunks. Every chunk is `chunk_size` bytes
/// except possibly the last. A read failure is yielded once, then the
/// sequence ends. Holds the proxy's capture lock until the body is finished
/// or the sequence is dropped; dropping it also closes the connection.
pub struct SnapshotChunks<'a> {
    // Declared before the guard so the connection closes before the lock opens.
    body: Option<Box<dyn Read + Send>>,
    capture_guard: Option<MutexGuard<'a, ()>>,
    url: String,
    chunk_size: usize,
    delivered: usize,
}

impl<'a> SnapshotChunks<'a> {
    fn new(
        body: Box<dyn Read + Send>,
        url: String,
        chunk_size: usize,
        capture_guard: Option<MutexGuard<'a, ()>>,
    ) -> Self {
        SnapshotChunks {
            body: Some(body),
            capture_guard,
            url,
            chunk_size: chunk_size.max(1),
            delivered: 0,
        }
    }

    /// Drains the remaining chunks into one buffer.
    pub fn collect_bytes(self) -> Result<Vec<u8>, CaptureError> {
        let mut image = Vec::new();
        for chunk in self {
            image.extend_from_slice(&chunk?);
        }
        Ok(image)
    }

    fn finish(&mut self) {
        self.body = None;
        if self.capture_guard.take().is_some() {
            debug!("Released snapshot capture lock for {}", self.url);
        }
    }
}

impl Iterator for SnapshotChunks<'_> {
    type Item = Result<Vec<u8>, CaptureError>;

    fn next(&mut self) -> Option<Self::Item> {
        let body = self.body.as_mut()?;
        let mut chunk = vec![0u8; self.chunk_size];
        let mut filled = 0;
        let mut at_eof = false;

        while filled < chunk.len() {
            match body.read(&mut chunk[filled..]) {
                Ok(0) => {
                    at_eof = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finish();
                    error!(
                        "❌ Snapshot body from {} broke off after {} bytes: {}",
                        self.url,
                        self.delivered + filled,
                        e
                    );
                    return Some(Err(CaptureError::request_failed(&self.url, error_chain(&e))));
                }
            }
        }

        if at_eof {
            self.finish();
            debug!("Snapshot body from {} complete ({} bytes)", self.url, self.delivered + filled);
        }
        if filled == 0 {
            return None;
        }
        chunk.truncate(filled);
        self.delivered += filled;
        Some(Ok(chunk))
    }
}

impl FusedIterator for SnapshotChunks<'_> {}
