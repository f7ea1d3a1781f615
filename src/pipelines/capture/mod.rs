// SPDX-License-Identifier: GPL-3.0-only

//! Capture orchestration
//!
//! One run per [`CaptureRequest`], strictly in this order:
//!
//! ```text
//! Bind → Torch → Zoom → Filter compile → (Delay) → Capture
//! ```
//!
//! Every run ends in exactly one [`CaptureOutcome`]. Binding and capture
//! failures are terminal for the request; torch and zoom failures are
//! logged and the run carries on. Nothing is retried.
//!
//! The compiled filter is returned in the [`CaptureReport`] but is not
//! applied to the saved file.
//!
//! # Sharing the camera
//!
//! With [`SessionPolicy::Exclusive`] a run holds the camera session from
//! binding until its capture completes, including the timer; overlapping
//! requests queue in arrival order. [`SessionPolicy::Unsynchronized`]
//! releases the session for the timer, so a second request can rebind the
//! camera under a waiting one.

pub mod outcome;
pub mod request;
pub mod state;

pub use outcome::{CaptureOutcome, CaptureReport};
pub use request::{CaptureCall, CaptureRequest, CaptureRequestBuilder};
pub use state::CaptureState;

use crate::backends::camera::{BackendError, CameraSession, SessionGuard};
use crate::config::{Config, SessionPolicy};
use crate::errors::FailureReason;
use crate::filter;
use crate::params::DeviceControls;
use crate::storage;
use futures::channel::oneshot;
use state::StateTrace;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{Instrument, debug, error, info, info_span, warn};

/// Runs capture requests against a shared camera session
#[derive(Clone)]
pub struct CaptureOrchestrator {
    session: CameraSession,
    output_dir: PathBuf,
    policy: SessionPolicy,
    next_request_id: Arc<AtomicU64>,
}

impl CaptureOrchestrator {
    pub fn new(session: CameraSession, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            session,
            output_dir: output_dir.into(),
            policy: SessionPolicy::default(),
            next_request_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn from_config(session: CameraSession, config: &Config) -> Self {
        Self::new(session, config.photo_dir()).with_policy(config.session_policy)
    }

    pub fn with_policy(mut self, policy: SessionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn session(&self) -> &CameraSession {
        &self.session
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    /// Run one request to completion and report what happened
    pub async fn run(&self, request: CaptureRequest) -> CaptureReport {
        let id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        let span = info_span!("capture", request = id, facing = %request.facing);
        self.execute(request).instrument(span).await
    }

    /// Run one request and return only its outcome
    pub async fn capture(&self, request: CaptureRequest) -> CaptureOutcome {
        self.run(request).await.outcome
    }

    /// Run a request in the background and hand the outcome to `on_complete`
    ///
    /// `on_complete` is called exactly once, even if the device panics
    /// mid-run; that case is reported as [`FailureReason::Worker`]. Must be
    /// called from within a tokio runtime.
    pub fn take_photo<F>(&self, request: CaptureRequest, on_complete: F) -> tokio::task::JoinHandle<()>
    where
        F: FnOnce(CaptureOutcome) + Send + 'static,
    {
        let orchestrator = self.clone();
        tokio::spawn(async move {
            let run = tokio::spawn(async move { orchestrator.capture(request).await });
            let outcome = match run.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(error = %e, "Capture task did not complete");
                    CaptureOutcome::Failed {
                        reason: FailureReason::Worker(e.to_string()),
                    }
                }
            };
            on_complete(outcome);
        })
    }

    /// Run a request in the background; the receiver resolves with its outcome
    pub fn submit(&self, request: CaptureRequest) -> oneshot::Receiver<CaptureOutcome> {
        let (sender, receiver) = oneshot::channel();
        self.take_photo(request, move |outcome| {
            if sender.send(outcome).is_err() {
                debug!("Capture outcome dropped, receiver gone");
            }
        });
        receiver
    }

    async fn execute(&self, request: CaptureRequest) -> CaptureReport {
        let mut trace = StateTrace::new();
        let controls = DeviceControls::map(request.facing, request.flash_mode, request.zoom);

        info!(
            flash = %request.flash_mode,
            zoom = request.zoom,
            timer = request.timer_sec,
            policy = ?self.policy,
            "Capture requested"
        );

        // Bind
        trace.advance(CaptureState::BindingDevice);
        let mut guard = self.session.acquire().await;
        if let Err(e) = guard.ensure_bound(controls.facing) {
            error!(error = %e, "Camera bind failed");
            trace.advance(CaptureState::Failed);
            return CaptureReport {
                outcome: CaptureOutcome::Failed {
                    reason: FailureReason::Bind(e.to_string()),
                },
                controls,
                filter: None,
                states: trace.into_states(),
            };
        }

        // Torch, zoom, filter
        trace.advance(CaptureState::ApplyingParameters);
        apply_controls(&mut guard, &controls);
        let spec = filter::parse(&request.filter_xml);
        let matrix = filter::compile(&spec);
        debug!(?spec, "Filter compiled; saved photos keep the unfiltered sensor output");

        // Delay
        let guard = if request.timer_sec > 0 {
            trace.advance(CaptureState::AwaitingTimer);
            let delay = Duration::from_secs(u64::from(request.timer_sec));
            match self.policy {
                SessionPolicy::Exclusive => {
                    tokio::time::sleep(delay).await;
                    guard
                }
                SessionPolicy::Unsynchronized => {
                    drop(guard);
                    tokio::time::sleep(delay).await;
                    self.session.acquire().await
                }
            }
        } else {
            guard
        };

        // Capture
        trace.advance(CaptureState::Capturing);
        let outcome = self.capture_with(guard).await;
        trace.advance(if outcome.is_success() {
            CaptureState::Succeeded
        } else {
            CaptureState::Failed
        });

        CaptureReport {
            outcome,
            controls,
            filter: Some(matrix),
            states: trace.into_states(),
        }
    }

    async fn capture_with(&self, guard: SessionGuard) -> CaptureOutcome {
        let path = match storage::prepare_photo_path(&self.output_dir).await {
            Ok(path) => path,
            Err(e) => {
                error!(dir = %self.output_dir.display(), error = %e, "Cannot prepare photo path");
                return CaptureOutcome::Failed {
                    reason: FailureReason::Storage(e.to_string()),
                };
            }
        };

        match guard.capture_to_file(path.clone()).await {
            Ok(()) => {
                info!(path = %path.display(), "Photo captured");
                CaptureOutcome::Succeeded { path }
            }
            Err(BackendError::WorkerFailed(msg)) => {
                error!(error = %msg, "Capture worker failed");
                CaptureOutcome::Failed {
                    reason: FailureReason::Worker(msg),
                }
            }
            Err(e) => {
                error!(error = %e, "Photo capture failed");
                CaptureOutcome::Failed {
                    reason: FailureReason::Capture(e.to_string()),
                }
            }
        }
    }
}

/// Torch first, then zoom; failures degrade to a warning
fn apply_controls(guard: &mut SessionGuard, controls: &DeviceControls) {
    if let Err(e) = guard.set_torch(controls.torch_on) {
        warn!(torch_on = controls.torch_on, error = %e, "Failed to set torch");
    }
    if let Err(e) = guard.set_linear_zoom(controls.linear_zoom) {
        warn!(linear_zoom = controls.linear_zoom, error = %e, "Failed to set zoom");
    }
}
