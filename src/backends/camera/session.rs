// SPDX-License-Identifier: GPL-3.0-only

//! Camera session ownership
//!
//! The device handle is the only shared mutable resource in the capture
//! pipeline. [`CameraSession`] owns it behind a FIFO-fair async mutex;
//! whoever holds a [`SessionGuard`] is the only one issuing commands.
//!
//! The session also remembers which facing it last bound, so a request for
//! the same facing reuses the session instead of re-acquiring the device.

use super::types::*;
use super::CameraDevice;
use crate::params::CameraFacing;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

struct SessionSlot {
    device: Box<dyn CameraDevice>,
    /// Facing bound through this session, `None` until a bind succeeds
    bound: Option<CameraFacing>,
}

/// Shared owner of a camera device
///
/// Cheap to clone; every clone refers to the same device.
#[derive(Clone)]
pub struct CameraSession {
    slot: Arc<Mutex<SessionSlot>>,
}

impl CameraSession {
    pub fn new<D: CameraDevice + 'static>(device: D) -> Self {
        Self::from_boxed(Box::new(device))
    }

    pub fn from_boxed(device: Box<dyn CameraDevice>) -> Self {
        info!(device = device.name(), "Creating camera session");
        Self {
            slot: Arc::new(Mutex::new(SessionSlot {
                device,
                bound: None,
            })),
        }
    }

    /// Wait for exclusive access to the device
    ///
    /// Waiters are served in the order they called `acquire`.
    pub async fn acquire(&self) -> SessionGuard {
        let slot = Arc::clone(&self.slot).lock_owned().await;
        debug!("Camera session acquired");
        SessionGuard { slot }
    }

    /// Facing currently bound (waits for the session)
    pub async fn bound_facing(&self) -> Option<CameraFacing> {
        self.slot.lock().await.bound
    }

    /// Device-side state (waits for the session)
    pub async fn device_state(&self) -> CameraState {
        self.slot.lock().await.device.state()
    }
}

/// Exclusive access to the device; released on drop
pub struct SessionGuard {
    slot: OwnedMutexGuard<SessionSlot>,
}

impl SessionGuard {
    pub fn bound_facing(&self) -> Option<CameraFacing> {
        self.slot.bound
    }

    /// Make sure a session for `facing` is bound
    ///
    /// A facing change is a full re-acquisition: unbind everything, then
    /// bind the new facing. Returns `true` if a bind was performed.
    pub fn ensure_bound(&mut self, facing: CameraFacing) -> BackendResult<bool> {
        if self.slot.bound == Some(facing) {
            debug!(%facing, "Camera already bound to requested facing");
            return Ok(false);
        }

        info!(%facing, previous = ?self.slot.bound, "Binding camera");
        self.slot.bound = None;
        self.slot.device.unbind_all();
        self.slot.device.bind(facing)?;
        self.slot.bound = Some(facing);
        Ok(true)
    }

    pub fn set_torch(&mut self, on: bool) -> BackendResult<()> {
        self.require_bound()?;
        self.slot.device.set_torch(on)
    }

    pub fn set_linear_zoom(&mut self, zoom: f32) -> BackendResult<()> {
        self.require_bound()?;
        self.slot.device.set_linear_zoom(zoom)
    }

    /// Capture to `path` on the blocking worker pool, then release the session
    pub async fn capture_to_file(self, path: PathBuf) -> BackendResult<()> {
        let mut slot = self.slot;
        if slot.bound.is_none() {
            return Err(BackendError::NotBound);
        }

        let result = tokio::task::spawn_blocking(move || {
            let result = slot.device.capture_to_file(&path);
            drop(slot);
            result
        })
        .await;

        match result {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Capture worker did not complete");
                Err(BackendError::WorkerFailed(e.to_string()))
            }
        }
    }

    fn require_bound(&self) -> BackendResult<()> {
        if self.slot.bound.is_some() {
            Ok(())
        } else {
            Err(BackendError::NotBound)
        }
    }
}
