// SPDX-License-Identifier: GPL-3.0-only

//! Capture run state machine
//!
//! ```text
//! Idle → BindingDevice → ApplyingParameters ─┬─▶ AwaitingTimer ─┐
//!             │                              │                  ▼
//!             ▼                              └──────────────▶ Capturing → Succeeded
//!           Failed ◀──────────────────────────────────────────────┘
//! ```

use std::fmt;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    BindingDevice,
    ApplyingParameters,
    AwaitingTimer,
    Capturing,
    Succeeded,
    Failed,
}

impl CaptureState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CaptureState::Succeeded | CaptureState::Failed)
    }

    pub fn can_transition_to(&self, next: CaptureState) -> bool {
        use CaptureState::*;
        matches!(
            (self, next),
            (Idle, BindingDevice)
                | (BindingDevice, ApplyingParameters)
                | (BindingDevice, Failed)
                | (ApplyingParameters, AwaitingTimer)
                | (ApplyingParameters, Capturing)
                | (AwaitingTimer, Capturing)
                | (Capturing, Succeeded)
                | (Capturing, Failed)
        )
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaptureState::Idle => "idle",
            CaptureState::BindingDevice => "binding-device",
            CaptureState::ApplyingParameters => "applying-parameters",
            CaptureState::AwaitingTimer => "awaiting-timer",
            CaptureState::Capturing => "capturing",
            CaptureState::Succeeded => "succeeded",
            CaptureState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// States visited by one run, in order
#[derive(Debug, Clone)]
pub(crate) struct StateTrace {
    states: Vec<CaptureState>,
}

impl StateTrace {
    pub(crate) fn new() -> Self {
        Self {
            states: vec![CaptureState::Idle],
        }
    }

    pub(crate) fn current(&self) -> CaptureState {
        self.states.last().copied().unwrap_or(CaptureState::Idle)
    }

    pub(crate) fn advance(&mut self, next: CaptureState) {
        let current = self.current();
        debug_assert!(
            current.can_transition_to(next),
            "invalid capture transition {current} -> {next}"
        );
        info!(from = %current, to = %next, "Capture state");
        self.states.push(next);
    }

    pub(crate) fn into_states(self) -> Vec<CaptureState> {
        self.states
    }
}
