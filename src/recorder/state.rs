//! Recording state management
//!
//! Defines the recording phases, the segment ledger types, and the
//! time budget constants for segmented capture.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Maximum accumulated recording time across all segments, in seconds
pub const MAX_RECORDING_TIME: u32 = 60;

/// How long the record button must be held before capture starts
pub const REQUIRED_HOLD_TIME: Duration = Duration::from_millis(1000);

/// Current phase of the recording system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingPhase {
    /// No press and no capture in progress
    Idle,
    /// Press-and-hold window before capture starts
    Holding,
    /// Capture in flight
    Recording,
}

impl Default for RecordingPhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// A completed recording segment
///
/// Created only when a capture finishes successfully; never mutated
/// afterwards except by removal from the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingSegment {
    /// Unique segment identifier, assigned at creation
    pub id: Uuid,

    /// Opaque handle to the captured media
    pub media_reference: String,

    /// Wall-clock length of this segment in seconds
    pub duration_secs: u32,

    /// When the capture completed
    pub recorded_at: DateTime<Utc>,
}

impl RecordingSegment {
    /// Create a segment for a capture that just completed
    pub fn new(media_reference: String, duration_secs: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            media_reference,
            duration_secs,
            recorded_at: Utc::now(),
        }
    }
}

/// Snapshot of the recording session for a frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub phase: RecordingPhase,
    pub segments: Vec<RecordingSegment>,
    pub total_duration_secs: u32,
    pub remaining_secs: u32,
}

/// Format a second count as m:ss for the countdown display
pub fn format_time(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remaining = seconds % 60;
    format!("{}:{:02}", minutes, remaining)
}
