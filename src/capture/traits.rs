//! Capture trait definitions
//!
//! Platform-agnostic traits for the camera capability and permission
//! gateway. The application core only talks to these seams; platform
//! bindings live behind them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Permissions the application asks for during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionKind {
    /// Camera access, for taking pictures and videos
    Camera,
    /// Microphone access, for videos with audio
    Microphone,
    /// Media library access, to save and view captures
    MediaLibrary,
}

impl PermissionKind {
    /// All permissions required before the app is usable, in request order
    pub const ALL: [PermissionKind; 3] = [
        PermissionKind::Camera,
        PermissionKind::Microphone,
        PermissionKind::MediaLibrary,
    ];
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PermissionKind::Camera => "Camera",
            PermissionKind::Microphone => "Microphone",
            PermissionKind::MediaLibrary => "Media library",
        };
        write!(f, "{}", name)
    }
}

/// Result of a completed capture
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureResult {
    /// Opaque handle to the captured media (URI or equivalent)
    pub media_reference: String,
}

/// Errors raised by the capture capability
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("capture already in flight")]
    AlreadyCapturing,

    #[error("no capture in flight")]
    NotCapturing,

    #[error("camera unavailable: {0}")]
    Unavailable(String),

    #[error("capture failed: {0}")]
    Failed(String),
}

/// Camera capture capability
///
/// Single-shot: at most one capture may be in flight at a time. The
/// controller guards its own calls so `stop_capture` is never issued
/// without a matching start.
#[async_trait]
pub trait CameraCapture: Send + Sync {
    /// Begin an exclusive video capture
    async fn start_capture(&self) -> Result<(), CaptureError>;

    /// End the in-flight capture and yield the recorded media
    async fn stop_capture(&self) -> Result<CaptureResult, CaptureError>;
}

/// OS permission prompts
#[async_trait]
pub trait PermissionGateway: Send + Sync {
    /// Prompt for a permission; returns whether it was granted
    async fn request(&self, kind: PermissionKind) -> bool;
}
