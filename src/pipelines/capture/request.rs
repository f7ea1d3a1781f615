// SPDX-License-Identifier: GPL-3.0-only

//! Capture call arguments and the normalized request

use crate::params::{CameraFacing, FlashMode};
use serde::{Deserialize, Serialize};

/// Arguments of a capture call as they arrive from the caller
///
/// Every field is optional. A missing or `null` field takes the documented
/// default (`flashMode = "auto"`, `cameraFacing = "back"`, `timer = 0`,
/// `zoom = 1.0`) when converted into a [`CaptureRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptureCall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_xml: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_facing: Option<String>,
    /// Delay in seconds; negative values mean no delay
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
}

/// One user-initiated capture, consumed by a single orchestration run
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRequest {
    /// Raw filter description, parsed during parameter application
    pub filter_xml: String,
    pub flash_mode: FlashMode,
    pub facing: CameraFacing,
    /// Seconds to wait before capturing
    pub timer_sec: u32,
    /// Zoom factor, nominally 1.0..=4.0
    pub zoom: f32,
}

impl CaptureRequest {
    pub fn builder() -> CaptureRequestBuilder {
        CaptureRequestBuilder::default()
    }
}

impl Default for CaptureRequest {
    fn default() -> Self {
        Self::from(CaptureCall::default())
    }
}

impl From<CaptureCall> for CaptureRequest {
    fn from(call: CaptureCall) -> Self {
        let zoom = call.zoom.unwrap_or(1.0) as f32;
        let timer = call.timer.unwrap_or(0);
        Self {
            filter_xml: call.filter_xml.unwrap_or_default(),
            flash_mode: call
                .flash_mode
                .as_deref()
                .map(FlashMode::from_name)
                .unwrap_or_default(),
            facing: call
                .camera_facing
                .as_deref()
                .map(CameraFacing::from_name)
                .unwrap_or_default(),
            timer_sec: timer.clamp(0, u32::MAX as i64) as u32,
            zoom: if zoom.is_finite() { zoom } else { 1.0 },
        }
    }
}

/// Builder for [`CaptureRequest`]
#[derive(Debug, Clone, Default)]
pub struct CaptureRequestBuilder {
    request: CaptureRequest,
}

impl CaptureRequestBuilder {
    pub fn filter_xml(mut self, xml: impl Into<String>) -> Self {
        self.request.filter_xml = xml.into();
        self
    }

    pub fn flash_mode(mut self, mode: FlashMode) -> Self {
        self.request.flash_mode = mode;
        self
    }

    pub fn facing(mut self, facing: CameraFacing) -> Self {
        self.request.facing = facing;
        self
    }

    pub fn timer_sec(mut self, seconds: u32) -> Self {
        self.request.timer_sec = seconds;
        self
    }

    pub fn zoom(mut self, zoom: f32) -> Self {
        self.request.zoom = zoom;
        self
    }

    pub fn build(self) -> CaptureRequest {
        self.request
    }
}
