//! Segmented recording
//!
//! - `state`: phases, segment ledger types, time budget constants
//! - `controller`: the hold-to-record state machine
//! - `service`: timer-driving wrapper used by UI callbacks

pub mod controller;
pub mod service;
pub mod state;

pub use controller::{RecordingEvent, SegmentedRecordingController};
pub use service::RecorderService;
pub use state::{
    RecordingPhase, RecordingSegment, SessionSnapshot, MAX_RECORDING_TIME, REQUIRED_HOLD_TIME,
};
