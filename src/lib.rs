// SPDX-License-Identifier: MPL-2.0

//! Shutter - capture-configuration pipeline for camera apps
//!
//! Turns a capture call (filter description, flash mode, camera facing,
//! timer, zoom) into device commands and a single capture outcome.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`filter`]: Filter description parser and color matrix compiler
//! - [`params`]: Zoom/flash/facing mapping to device values
//! - [`backends`]: Camera device trait, session ownership, virtual camera
//! - [`pipelines`]: Capture orchestration state machine
//! - [`config`]: User configuration handling
//! - [`storage`]: Output file naming
//!
//! # Example
//!
//! ```no_run
//! use shutter::{CameraSession, CaptureOrchestrator, CaptureRequest, VirtualCamera};
//!
//! # async fn demo() {
//! let session = CameraSession::new(VirtualCamera::default());
//! let orchestrator = CaptureOrchestrator::new(session, "/tmp/shutter");
//! let outcome = orchestrator.capture(CaptureRequest::default()).await;
//! println!("{:?}", outcome.into_path());
//! # }
//! ```

pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod filter;
pub mod params;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use backends::camera::{BackendError, CameraDevice, CameraSession, CameraState};
pub use backends::virtual_camera::VirtualCamera;
pub use config::{Config, SessionPolicy};
pub use errors::{AppError, AppResult, FailureReason};
pub use filter::{ColorMatrix, FilterSpec};
pub use params::{CameraFacing, DeviceControls, FlashMode};
pub use pipelines::capture::{
    CaptureCall, CaptureOrchestrator, CaptureOutcome, CaptureReport, CaptureRequest, CaptureState,
};
