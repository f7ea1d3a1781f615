// SPDX-License-Identifier: MPL-2.0

//! Camera device abstraction
//!
//! The capture pipeline talks to hardware through the small [`CameraDevice`]
//! trait and never owns the device directly: it goes through a
//! [`CameraSession`], which serializes access.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │ CaptureOrchestrator │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │    CameraSession    │  ← Exclusive access, bound-facing tracking
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  CameraDevice Trait │  ← bind / torch / zoom / capture
//! └──────────┬──────────┘
//!            │
//!            ▼
//!     ┌──────────────┐
//!     │VirtualCamera │  ← Software implementation
//!     └──────────────┘
//! ```

pub mod session;
pub mod types;

pub use session::{CameraSession, SessionGuard};
pub use types::*;

use crate::params::CameraFacing;
use std::path::Path;

/// Minimal capability set of a physical camera
///
/// Implementations are driven from one request at a time through
/// [`CameraSession`]. `capture_to_file` may block and is called from a
/// blocking worker thread.
pub trait CameraDevice: Send {
    /// Acquire a capture session for `facing`
    fn bind(&mut self, facing: CameraFacing) -> BackendResult<()>;

    /// Release every bound session
    fn unbind_all(&mut self);

    /// Switch the torch LED on or off
    fn set_torch(&mut self, on: bool) -> BackendResult<()>;

    /// Set normalized linear zoom (`0.0` = widest, `1.0` = maximum)
    fn set_linear_zoom(&mut self, zoom: f32) -> BackendResult<()>;

    /// Take one picture and write it to `path`
    fn capture_to_file(&mut self, path: &Path) -> BackendResult<()>;

    /// Current device-side configuration (diagnostics only)
    fn state(&self) -> CameraState;

    /// Human-readable device name for logs
    fn name(&self) -> &str {
        "camera"
    }
}

impl<T: CameraDevice + ?Sized> CameraDevice for Box<T> {
    fn bind(&mut self, facing: CameraFacing) -> BackendResult<()> {
        (**self).bind(facing)
    }

    fn unbind_all(&mut self) {
        (**self).unbind_all()
    }

    fn set_torch(&mut self, on: bool) -> BackendResult<()> {
        (**self).set_torch(on)
    }

    fn set_linear_zoom(&mut self, zoom: f32) -> BackendResult<()> {
        (**self).set_linear_zoom(zoom)
    }

    fn capture_to_file(&mut self, path: &Path) -> BackendResult<()> {
        (**self).capture_to_file(path)
    }

    fn state(&self) -> CameraState {
        (**self).state()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
