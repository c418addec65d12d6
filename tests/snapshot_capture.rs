mod common;

use camstreamer_control::{CaptureError, SnapshotProxy, WebcamProvider, SNAPSHOT_CHUNK_SIZE};
use common::{config_for, fake_jpeg, provider_for, start_streamer};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::ResponseTemplate;

#[tokio::test(flavor = "multi_thread")]
async fn relays_body_in_fixed_size_chunks() {
    let image = fake_jpeg(2 * SNAPSHOT_CHUNK_SIZE + 300);
    let server = start_streamer(
        ResponseTemplate::new(200)
            .set_body_bytes(image.clone())
            .insert_header("content-type", "image/jpeg"),
    )
    .await;
    let config = config_for(&format!("{}/webcam/", server.uri()), 5);

    let chunks = tokio::task::spawn_blocking(move || {
        let proxy = SnapshotProxy::new();
        let chunks = proxy.capture(&config).expect("capture should succeed");
        chunks.collect::<Result<Vec<_>, CaptureError>>()
    })
    .await
    .unwrap()
    .unwrap();

    let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![SNAPSHOT_CHUNK_SIZE, SNAPSHOT_CHUNK_SIZE, 300]);
    assert_eq!(chunks.concat(), image);
}

#[tokio::test(flavor = "multi_thread")]
async fn upstream_503_fails_with_status_and_no_bytes() {
    let server = start_streamer(ResponseTemplate::new(503).set_body_string("busy")).await;
    let provider = provider_for(&format!("{}/webcam/", server.uri()), 5);

    let outcome = tokio::task::spawn_blocking(move || {
        provider.take_webcam_snapshot("camerastreamer_control").map(|c| c.collect_bytes())
    })
    .await
    .unwrap();

    let err = outcome.err().expect("503 must not yield a chunk sequence");
    assert_eq!(err.reason(), "upstream status");
    assert_eq!(err.status(), Some(503));
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_upstream_times_out_at_configured_limit() {
    let slow = ResponseTemplate::new(200)
        .set_body_bytes(fake_jpeg(64))
        .set_delay(Duration::from_secs(4));
    let server = start_streamer(slow).await;
    let config = config_for(&format!("{}/webcam", server.uri()), 1);

    let (elapsed, outcome) = tokio::task::spawn_blocking(move || {
        let start = Instant::now();
        let outcome = SnapshotProxy::new().capture(&config).map(|c| c.collect_bytes());
        (start.elapsed(), outcome)
    })
    .await
    .unwrap();

    let err = outcome.err().expect("capture should time out");
    assert_eq!(err.reason(), "request failed");
    assert!(elapsed >= Duration::from_millis(900), "gave up too early: {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(3500), "ignored the timeout: {:?}", elapsed);
}

#[tokio::test(flavor = "multi_thread")]
async fn refused_connection_is_a_request_failure() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = config_for(&format!("http://127.0.0.1:{}/webcam/", port), 2);

    let outcome = tokio::task::spawn_blocking(move || {
        SnapshotProxy::new().capture(&config).map(|c| c.collect_bytes())
    })
    .await
    .unwrap();

    match outcome {
        Err(CaptureError::RequestFailed { url, .. }) => {
            assert_eq!(url, format!("http://127.0.0.1:{}/webcam/snapshot", port));
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("capture against a closed port succeeded"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_captures_against_real_server_are_serialized() {
    let delay = Duration::from_millis(300);
    let server =
        start_streamer(ResponseTemplate::new(200).set_body_bytes(fake_jpeg(128)).set_delay(delay))
            .await;
    let provider = Arc::new(provider_for(&format!("{}/webcam/", server.uri()), 5));

    let start = Instant::now();
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let provider = Arc::clone(&provider);
            tokio::task::spawn_blocking(move || {
                provider.take_webcam_snapshot("cam").and_then(|c| c.collect_bytes())
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().len(), 128);
    }

    assert!(start.elapsed() >= delay * 2, "captures overlapped: {:?}", start.elapsed());
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}
