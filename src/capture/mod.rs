//! Capture capability seam
//!
//! The camera and permission prompts are external platform capabilities;
//! this module defines the traits the rest of the crate is written against.

pub mod traits;

pub use traits::{
    CameraCapture, CaptureError, CaptureResult, PermissionGateway, PermissionKind,
};
