//! End-to-end segmented recording scenarios driven through the service,
//! with virtual time and a fake camera.

use async_trait::async_trait;
use mie_shorts::capture::{CameraCapture, CaptureError, CaptureResult};
use mie_shorts::recorder::{RecorderService, RecordingPhase, MAX_RECORDING_TIME};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Default)]
struct FakeCamera {
    captures: AtomicUsize,
}

#[async_trait]
impl CameraCapture for FakeCamera {
    async fn start_capture(&self) -> Result<(), CaptureError> {
        Ok(())
    }

    async fn stop_capture(&self) -> Result<CaptureResult, CaptureError> {
        let n = self.captures.fetch_add(1, Ordering::SeqCst);
        Ok(CaptureResult {
            media_reference: format!("file:///captures/{}.mp4", n),
        })
    }
}

/// Fresh session: hold 1s, record 10s, release; then record until the
/// budget auto-stops the second segment at 50s.
#[tokio::test(start_paused = true)]
async fn two_segments_fill_the_budget() {
    let camera = Arc::new(FakeCamera::default());
    let service = RecorderService::new(camera.clone());

    // First segment: 10 seconds
    service.press_started().await;
    sleep(Duration::from_millis(1100)).await;
    sleep(Duration::from_secs(10)).await;
    let first = service.press_ended().await.expect("first segment");
    assert_eq!(first.duration_secs, 10);

    let snapshot = service.snapshot().await;
    assert_eq!(snapshot.segments.len(), 1);
    assert_eq!(snapshot.remaining_secs, 50);

    // Second press runs into the budget and is auto-stopped at 50s
    service.press_started().await;
    sleep(Duration::from_secs(90)).await;
    assert!(service.press_ended().await.is_none());

    let snapshot = service.snapshot().await;
    assert_eq!(snapshot.phase, RecordingPhase::Idle);
    assert_eq!(snapshot.segments.len(), 2);
    assert_eq!(snapshot.segments[1].duration_secs, 50);
    assert_eq!(snapshot.total_duration_secs, MAX_RECORDING_TIME);
    assert_eq!(snapshot.remaining_secs, 0);
    assert_eq!(camera.captures.load(Ordering::SeqCst), 2);

    // Exhausted budget rejects further presses outright
    service.press_started().await;
    sleep(Duration::from_secs(5)).await;
    assert_eq!(service.snapshot().await.segments.len(), 2);
    assert_eq!(camera.captures.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn deleting_a_segment_reopens_the_budget() {
    let camera = Arc::new(FakeCamera::default());
    let service = RecorderService::new(camera);

    service.press_started().await;
    sleep(Duration::from_millis(1100)).await;
    sleep(Duration::from_secs(20)).await;
    let segment = service.press_ended().await.expect("segment");

    assert_eq!(service.snapshot().await.remaining_secs, 40);
    assert!(service.delete_segment(segment.id).await);

    let snapshot = service.snapshot().await;
    assert!(snapshot.segments.is_empty());
    assert_eq!(snapshot.total_duration_secs, 0);
    assert_eq!(snapshot.remaining_secs, MAX_RECORDING_TIME);
}

#[tokio::test(start_paused = true)]
async fn reset_between_recordings() {
    let camera = Arc::new(FakeCamera::default());
    let service = RecorderService::new(camera);

    for _ in 0..3 {
        service.press_started().await;
        sleep(Duration::from_millis(1100)).await;
        sleep(Duration::from_secs(5)).await;
        service.press_ended().await.expect("segment");
    }

    let snapshot = service.snapshot().await;
    assert_eq!(snapshot.segments.len(), 3);
    assert_eq!(snapshot.total_duration_secs, 15);

    service.reset_all().await;
    let snapshot = service.snapshot().await;
    assert!(snapshot.segments.is_empty());
    assert_eq!(snapshot.remaining_secs, MAX_RECORDING_TIME);
}
