//! Segmented recording controller
//!
//! Owns the press-and-hold gating, the segment ledger, and the 60 second
//! time budget, and issues start/stop commands to the camera capability.
//!
//! The controller is a single-owner state machine: every transition runs
//! through `&mut self` behind the service's mutex, so press events, the
//! hold timer firing, and the per-second tick are serialized.

use super::state::{RecordingPhase, RecordingSegment, SessionSnapshot, MAX_RECORDING_TIME};
use crate::capture::CameraCapture;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::time::Instant;
use uuid::Uuid;

/// Events emitted while operating the recorder
#[derive(Debug, Clone)]
pub enum RecordingEvent {
    /// Press began; hold indicator should be shown
    HoldStarted,
    /// Press released before the hold time elapsed; nothing was captured
    HoldCancelled,
    /// Capture started
    Started,
    /// Capture stopped by the user releasing the button
    Stopped,
    /// Capture stopped because the time budget ran out
    AutoStopped,
    /// Per-second countdown update (remaining seconds)
    Progress(u32),
    /// Capture failed; state returned to idle
    Error(String),
}

/// Hold-to-record state machine over a single camera capability
pub struct SegmentedRecordingController {
    /// Injected camera capability
    capture: Arc<dyn CameraCapture>,

    /// Current phase
    phase: RecordingPhase,

    /// Completed segments, in recording order
    segments: Vec<RecordingSegment>,

    /// Sum of all segment durations
    total_duration_secs: u32,

    /// Countdown toward the budget; recomputed from the total when the
    /// ledger changes, decremented once per second while recording
    remaining_secs: u32,

    /// Generation counter for the hold timer; a press arms one generation
    /// and cancellation bumps it, so a stale timer firing is inert
    hold_generation: u64,

    /// When the in-flight capture started
    capture_started_at: Option<Instant>,

    /// Event broadcaster
    event_tx: broadcast::Sender<RecordingEvent>,
}

impl SegmentedRecordingController {
    /// Create a controller with an empty ledger and a full time budget
    pub fn new(capture: Arc<dyn CameraCapture>) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            capture,
            phase: RecordingPhase::Idle,
            segments: Vec::new(),
            total_duration_secs: 0,
            remaining_secs: MAX_RECORDING_TIME,
            hold_generation: 0,
            capture_started_at: None,
            event_tx,
        }
    }

    /// Subscribe to recording events
    pub fn subscribe(&self) -> broadcast::Receiver<RecordingEvent> {
        self.event_tx.subscribe()
    }

    pub fn phase(&self) -> RecordingPhase {
        self.phase
    }

    pub fn is_recording(&self) -> bool {
        self.phase == RecordingPhase::Recording
    }

    pub fn is_holding(&self) -> bool {
        self.phase == RecordingPhase::Holding
    }

    pub fn segments(&self) -> &[RecordingSegment] {
        &self.segments
    }

    pub fn total_duration_secs(&self) -> u32 {
        self.total_duration_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Snapshot the session state for a frontend
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            segments: self.segments.clone(),
            total_duration_secs: self.total_duration_secs,
            remaining_secs: self.remaining_secs,
        }
    }

    /// Record button pressed
    ///
    /// Transitions `Idle -> Holding` and returns the hold generation the
    /// caller must pass back to `hold_elapsed` when the hold timer fires.
    /// A no-op (returning `None`) when the budget is exhausted or a hold
    /// or capture is already underway.
    pub fn begin_press(&mut self) -> Option<u64> {
        if self.phase != RecordingPhase::Idle {
            return None;
        }
        if self.remaining_secs == 0 {
            tracing::debug!("press ignored, time budget exhausted");
            return None;
        }

        self.phase = RecordingPhase::Holding;
        self.hold_generation += 1;
        let _ = self.event_tx.send(RecordingEvent::HoldStarted);
        Some(self.hold_generation)
    }

    /// Hold timer fired for the given generation
    ///
    /// Stale generations (press already released or re-armed) are ignored,
    /// which gives the guaranteed non-firing semantics for cancelled holds:
    /// cancellation bumps the generation under the same lock that runs this
    /// method.
    pub async fn hold_elapsed(&mut self, generation: u64) {
        if self.phase != RecordingPhase::Holding || generation != self.hold_generation {
            return;
        }

        match self.capture.start_capture().await {
            Ok(()) => {
                self.phase = RecordingPhase::Recording;
                self.capture_started_at = Some(Instant::now());
                tracing::info!("recording started, {}s remaining", self.remaining_secs);
                let _ = self.event_tx.send(RecordingEvent::Started);
            }
            Err(e) => {
                tracing::error!("failed to start capture: {}", e);
                self.phase = RecordingPhase::Idle;
                let _ = self.event_tx.send(RecordingEvent::Error(e.to_string()));
            }
        }
    }

    /// Record button released
    ///
    /// Cancels a pending hold without ever starting a capture, or stops an
    /// active capture and appends the resulting segment to the ledger.
    pub async fn end_press(&mut self) -> Option<RecordingSegment> {
        match self.phase {
            RecordingPhase::Idle => None,
            RecordingPhase::Holding => {
                self.hold_generation += 1;
                self.phase = RecordingPhase::Idle;
                let _ = self.event_tx.send(RecordingEvent::HoldCancelled);
                None
            }
            RecordingPhase::Recording => self.finish_capture(false).await,
        }
    }

    /// Per-second countdown while recording
    ///
    /// Decrements the remaining budget; at zero, forces the same stop path
    /// as a user release. A no-op outside the `Recording` phase, so a tick
    /// racing a user stop loses cleanly.
    pub async fn tick(&mut self) -> Option<RecordingSegment> {
        if self.phase != RecordingPhase::Recording {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        let _ = self.event_tx.send(RecordingEvent::Progress(self.remaining_secs));

        if self.remaining_secs == 0 {
            tracing::info!("time budget exhausted, stopping recording");
            return self.finish_capture(true).await;
        }
        None
    }

    /// Remove a segment from the ledger
    ///
    /// Returns whether a segment was removed; unknown ids are a no-op.
    pub fn delete_segment(&mut self, id: Uuid) -> bool {
        let Some(index) = self.segments.iter().position(|s| s.id == id) else {
            return false;
        };
        let removed = self.segments.remove(index);
        self.total_duration_secs = self.total_duration_secs.saturating_sub(removed.duration_secs);
        self.recompute_remaining();
        tracing::info!(
            "deleted segment {} ({}s), {}s remaining",
            removed.id,
            removed.duration_secs,
            self.remaining_secs
        );
        true
    }

    /// Clear the ledger and restore the full time budget
    pub fn reset_all(&mut self) {
        self.segments.clear();
        self.total_duration_secs = 0;
        self.remaining_secs = MAX_RECORDING_TIME;
        tracing::info!("all segments cleared");
    }

    fn recompute_remaining(&mut self) {
        self.remaining_secs = MAX_RECORDING_TIME.saturating_sub(self.total_duration_secs);
    }

    /// Stop the in-flight capture and settle the ledger
    ///
    /// The phase is cleared before awaiting the capability, so a concurrent
    /// stop request (user release vs. budget exhaustion, whichever lost the
    /// race) sees `Idle` and never issues a duplicate stop.
    async fn finish_capture(&mut self, auto: bool) -> Option<RecordingSegment> {
        if self.phase != RecordingPhase::Recording {
            return None;
        }
        self.phase = RecordingPhase::Idle;
        let started_at = self.capture_started_at.take();

        match self.capture.stop_capture().await {
            Ok(result) => {
                let elapsed = started_at.map(|t| t.elapsed()).unwrap_or_default();
                let duration = elapsed.as_secs_f64().round() as u32;
                // Rounding must not push the total past the budget
                let budget_left = MAX_RECORDING_TIME.saturating_sub(self.total_duration_secs);
                let duration = duration.min(budget_left);

                let segment = RecordingSegment::new(result.media_reference, duration);
                tracing::info!("recorded segment {} ({}s)", segment.id, segment.duration_secs);

                self.segments.push(segment.clone());
                self.total_duration_secs += duration;
                self.recompute_remaining();

                let event = if auto {
                    RecordingEvent::AutoStopped
                } else {
                    RecordingEvent::Stopped
                };
                let _ = self.event_tx.send(event);
                Some(segment)
            }
            Err(e) => {
                tracing::error!("capture failed: {}", e);
                self.recompute_remaining();
                let _ = self.event_tx.send(RecordingEvent::Error(e.to_string()));
                None
            }
        }
    }
}
