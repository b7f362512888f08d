//! Recorder service
//!
//! Wraps the controller for use from UI callbacks: owns the hold timer and
//! the per-second countdown task, and serializes all state transitions
//! through one mutex.

use super::controller::{RecordingEvent, SegmentedRecordingController};
use super::state::{RecordingSegment, SessionSnapshot, REQUIRED_HOLD_TIME};
use crate::capture::CameraCapture;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Drives a [`SegmentedRecordingController`] from press events
pub struct RecorderService {
    controller: Arc<Mutex<SegmentedRecordingController>>,

    /// Task armed on press: sleeps the hold window, starts capture, then
    /// ticks the countdown once per second until recording ends
    press_task: parking_lot::Mutex<Option<JoinHandle<()>>>,
}

impl RecorderService {
    /// Create a service around the given camera capability
    pub fn new(capture: Arc<dyn CameraCapture>) -> Self {
        Self {
            controller: Arc::new(Mutex::new(SegmentedRecordingController::new(capture))),
            press_task: parking_lot::Mutex::new(None),
        }
    }

    /// Subscribe to recording events
    pub async fn subscribe(&self) -> broadcast::Receiver<RecordingEvent> {
        self.controller.lock().await.subscribe()
    }

    /// Snapshot the session state
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.controller.lock().await.snapshot()
    }

    /// Record button pressed: arm the hold timer
    ///
    /// Ignored while a hold or capture is already underway, or when the
    /// time budget is exhausted.
    pub async fn press_started(&self) {
        let generation = {
            let mut controller = self.controller.lock().await;
            match controller.begin_press() {
                Some(generation) => generation,
                None => return,
            }
        };

        let controller = Arc::clone(&self.controller);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(REQUIRED_HOLD_TIME).await;
            {
                let mut controller = controller.lock().await;
                controller.hold_elapsed(generation).await;
                if !controller.is_recording() {
                    return;
                }
            }
            // Countdown; the lock is never held across a sleep
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                let mut controller = controller.lock().await;
                controller.tick().await;
                if !controller.is_recording() {
                    break;
                }
            }
        });

        if let Some(old) = self.press_task.lock().replace(handle) {
            old.abort();
        }
    }

    /// Record button released
    ///
    /// Returns the completed segment when a capture was in flight. The
    /// armed press task is torn down; a hold timer that already raced past
    /// cancellation is neutralized by the controller's generation guard.
    pub async fn press_ended(&self) -> Option<RecordingSegment> {
        let segment = self.controller.lock().await.end_press().await;
        if let Some(task) = self.press_task.lock().take() {
            task.abort();
        }
        segment
    }

    /// Remove one segment from the ledger
    pub async fn delete_segment(&self, id: Uuid) -> bool {
        self.controller.lock().await.delete_segment(id)
    }

    /// Clear all segments and restore the full budget
    pub async fn reset_all(&self) {
        self.controller.lock().await.reset_all();
    }
}

impl Drop for RecorderService {
    fn drop(&mut self) {
        if let Some(task) = self.press_task.lock().take() {
            task.abort();
        }
    }
}
