// SPDX-License-Identifier: GPL-3.0-only

//! Parameter mapping
//!
//! Converts caller-facing capture parameters (zoom factor, named flash mode,
//! named camera facing) into the normalized values the device understands.

use crate::constants::zoom::{MAX_FACTOR, MIN_FACTOR};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Flash mode requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashMode {
    On,
    Off,
    /// Devices here only expose a torch, so auto behaves like `Off`
    #[default]
    Auto,
}

impl FlashMode {
    /// Case-insensitive lookup; unknown names fall back to `Auto`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "on" => FlashMode::On,
            "off" => FlashMode::Off,
            "auto" => FlashMode::Auto,
            other => {
                debug!(name = other, "Unknown flash mode, using auto");
                FlashMode::Auto
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlashMode::On => "on",
            FlashMode::Off => "off",
            FlashMode::Auto => "auto",
        }
    }
}

impl fmt::Display for FlashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which physical camera to bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraFacing {
    Front,
    #[default]
    Back,
}

impl CameraFacing {
    /// Case-insensitive lookup; anything that is not `front` selects `Back`
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("front") {
            CameraFacing::Front
        } else {
            CameraFacing::Back
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CameraFacing::Front => "front",
            CameraFacing::Back => "back",
        }
    }
}

impl fmt::Display for CameraFacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a zoom factor in `[1.0, 4.0]` onto the device's linear zoom `[0, 1]`
///
/// Out-of-range factors clamp to the nearest bound; NaN maps to 0.
pub fn map_zoom(zoom_factor: f32) -> f32 {
    let linear = (zoom_factor - MIN_FACTOR) / (MAX_FACTOR - MIN_FACTOR);
    if linear.is_nan() {
        return 0.0;
    }
    linear.clamp(0.0, 1.0)
}

/// Torch state for a flash mode
pub fn map_flash(mode: FlashMode) -> bool {
    match mode {
        FlashMode::On => true,
        FlashMode::Off | FlashMode::Auto => false,
    }
}

/// Device selector for a named facing
pub fn map_facing(name: &str) -> CameraFacing {
    CameraFacing::from_name(name)
}

/// Device-control values derived for one capture request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceControls {
    pub facing: CameraFacing,
    pub torch_on: bool,
    /// Normalized linear zoom in `[0, 1]`
    pub linear_zoom: f32,
}

impl DeviceControls {
    pub fn map(facing: CameraFacing, flash: FlashMode, zoom_factor: f32) -> Self {
        let controls = Self {
            facing,
            torch_on: map_flash(flash),
            linear_zoom: map_zoom(zoom_factor),
        };
        debug!(
            facing = %controls.facing,
            flash = %flash,
            torch_on = controls.torch_on,
            zoom_factor,
            linear_zoom = controls.linear_zoom,
            "Mapped capture parameters"
        );
        controls
    }
}
