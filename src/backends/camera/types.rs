// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for camera backends

use crate::params::CameraFacing;

/// Snapshot of what a device currently has configured
///
/// Owned by the device; the capture pipeline only issues commands and never
/// reads this back.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraState {
    /// Facing of the bound session, `None` when nothing is bound
    pub facing: Option<CameraFacing>,
    pub torch_on: bool,
    /// Normalized linear zoom in `[0, 1]`
    pub linear_zoom: f32,
}

impl CameraState {
    pub fn is_bound(&self) -> bool {
        self.facing.is_some()
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone)]
pub enum BackendError {
    /// The device could not be acquired for the requested facing
    BindFailed(String),
    /// A command needed a bound session but none was active
    NotBound,
    /// Torch or zoom control was rejected
    ControlFailed(String),
    /// The device failed to produce the output file
    CaptureFailed(String),
    /// The blocking capture worker did not return
    WorkerFailed(String),
    /// General I/O error
    IoError(String),
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::BindFailed(msg) => write!(f, "Bind failed: {}", msg),
            BackendError::NotBound => write!(f, "No camera session bound"),
            BackendError::ControlFailed(msg) => write!(f, "Control failed: {}", msg),
            BackendError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            BackendError::WorkerFailed(msg) => write!(f, "Capture worker failed: {}", msg),
            BackendError::IoError(msg) => write!(f, "I/O error: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::IoError(err.to_string())
    }
}
