//! MIE Shorts - segmented short-video recording shell.
//!
//! This crate models the application behind a shorts-style camera app:
//! a hold-to-record segmented capture controller with a 60 second budget,
//! a first-run onboarding permission flow, a static shorts feed, and the
//! tab shell that routes between them. Platform capabilities (camera,
//! permission prompts, alerts, flag storage) are injected at the seams
//! defined in `capture`, `onboarding`, and `store`.

pub mod capture;
pub mod feed;
pub mod onboarding;
pub mod recorder;
pub mod shell;
pub mod store;
pub mod utils;

pub use capture::{CameraCapture, CaptureError, CaptureResult, PermissionGateway, PermissionKind};
pub use recorder::{
    RecorderService, RecordingEvent, RecordingPhase, RecordingSegment, SegmentedRecordingController,
    MAX_RECORDING_TIME, REQUIRED_HOLD_TIME,
};
pub use shell::{App, Route, Tab};
pub use utils::{AppError, AppResult};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for a host application
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mie_shorts=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MIE Shorts v{}", env!("CARGO_PKG_VERSION"));
}
