// SPDX-License-Identifier: GPL-3.0-only

//! Terminal results of a capture run

use super::state::CaptureState;
use crate::errors::FailureReason;
use crate::filter::ColorMatrix;
use crate::params::DeviceControls;
use std::path::{Path, PathBuf};

/// Exactly one of these is produced per request
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// The photo was written to `path` (absolute)
    Succeeded { path: PathBuf },
    Failed { reason: FailureReason },
}

impl CaptureOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CaptureOutcome::Succeeded { .. })
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            CaptureOutcome::Succeeded { path } => Some(path),
            CaptureOutcome::Failed { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            CaptureOutcome::Succeeded { .. } => None,
            CaptureOutcome::Failed { reason } => Some(reason),
        }
    }

    /// Binary form: the saved path, or nothing on failure
    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            CaptureOutcome::Succeeded { path } => Some(path),
            CaptureOutcome::Failed { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<PathBuf, FailureReason> {
        match self {
            CaptureOutcome::Succeeded { path } => Ok(path),
            CaptureOutcome::Failed { reason } => Err(reason),
        }
    }
}

/// Everything a run produced, for callers that want more than the outcome
#[derive(Debug, Clone)]
pub struct CaptureReport {
    pub outcome: CaptureOutcome,
    /// Device values derived from the request
    pub controls: DeviceControls,
    /// Compiled filter, `None` if the run failed before parameters applied
    ///
    /// Not applied to the saved file; see [`ColorMatrix::apply_rgba8`].
    pub filter: Option<ColorMatrix>,
    /// States visited, starting at `Idle` and ending in a terminal state
    pub states: Vec<CaptureState>,
}
