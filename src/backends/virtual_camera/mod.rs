// SPDX-License-Identifier: GPL-3.0-only

//! Software camera device
//!
//! Implements [`CameraDevice`] without hardware: each capture renders a
//! synthetic scene for the bound facing and writes it as a JPEG. The torch
//! brightens the scene and linear zoom crops towards the centre, so device
//! commands have a visible effect on the output.
//!
//! ```text
//! bind(facing) ─▶ set_torch / set_linear_zoom ─▶ capture_to_file
//!                                                   │
//!                                                   ▼
//!                                     render scene (RgbImage)
//!                                                   │
//!                                                   ▼
//!                                       JPEG encode ─▶ disk
//! ```

use crate::backends::camera::types::{BackendError, BackendResult, CameraState};
use crate::backends::camera::CameraDevice;
use crate::config::VirtualCameraConfig;
use crate::constants::virtual_camera::TORCH_GAIN;
use crate::params::CameraFacing;
use image::{Rgb, RgbImage};
use std::path::Path;
use tracing::{debug, info};

/// Virtual camera device
pub struct VirtualCamera {
    config: VirtualCameraConfig,
    state: CameraState,
    captures: u64,
}

impl VirtualCamera {
    pub fn new(config: VirtualCameraConfig) -> Self {
        Self {
            config,
            state: CameraState::default(),
            captures: 0,
        }
    }

    /// Number of pictures written so far
    pub fn capture_count(&self) -> u64 {
        self.captures
    }

    /// Render the scene as the bound sensor would see it
    pub fn render_frame(&self) -> BackendResult<RgbImage> {
        let facing = self.state.facing.ok_or(BackendError::NotBound)?;
        let width = self.config.width.max(1);
        let height = self.config.height.max(1);

        // Linear zoom 0..1 corresponds to a 1x..4x crop
        let magnification = 1.0 + 3.0 * self.state.linear_zoom;
        let gain = if self.state.torch_on { TORCH_GAIN } else { 1.0 };
        let cx = width as f32 / 2.0;
        let cy = height as f32 / 2.0;

        let image = RgbImage::from_fn(width, height, |x, y| {
            // Scene coordinates in 0..1 after cropping towards the centre
            let u = (cx + (x as f32 - cx) / magnification) / width as f32;
            let v = (cy + (y as f32 - cy) / magnification) / height as f32;
            let [r, g, b] = scene_color(facing, u, v);
            Rgb([shade(r, gain), shade(g, gain), shade(b, gain)])
        });

        Ok(image)
    }
}

impl Default for VirtualCamera {
    fn default() -> Self {
        Self::new(VirtualCameraConfig::default())
    }
}

impl CameraDevice for VirtualCamera {
    fn bind(&mut self, facing: CameraFacing) -> BackendResult<()> {
        if self.config.width == 0 || self.config.height == 0 {
            return Err(BackendError::BindFailed(format!(
                "invalid sensor size {}x{}",
                self.config.width, self.config.height
            )));
        }
        info!(%facing, width = self.config.width, height = self.config.height, "Virtual camera bound");
        self.state.facing = Some(facing);
        Ok(())
    }

    fn unbind_all(&mut self) {
        debug!("Virtual camera unbound");
        self.state = CameraState::default();
    }

    fn set_torch(&mut self, on: bool) -> BackendResult<()> {
        if !self.state.is_bound() {
            return Err(BackendError::NotBound);
        }
        self.state.torch_on = on;
        Ok(())
    }

    fn set_linear_zoom(&mut self, zoom: f32) -> BackendResult<()> {
        if !self.state.is_bound() {
            return Err(BackendError::NotBound);
        }
        if !(0.0..=1.0).contains(&zoom) {
            return Err(BackendError::ControlFailed(format!(
                "linear zoom {} outside [0, 1]",
                zoom
            )));
        }
        self.state.linear_zoom = zoom;
        Ok(())
    }

    fn capture_to_file(&mut self, path: &Path) -> BackendResult<()> {
        let frame = self.render_frame()?;
        let data = encode_jpeg(&frame, self.config.jpeg_quality)?;
        std::fs::write(path, &data)
            .map_err(|e| BackendError::CaptureFailed(format!("failed to write photo: {}", e)))?;

        self.captures += 1;
        info!(path = %path.display(), bytes = data.len(), "Virtual camera photo written");
        Ok(())
    }

    fn state(&self) -> CameraState {
        self.state
    }

    fn name(&self) -> &str {
        "virtual"
    }
}

/// Synthetic scene: back camera sees a warm landscape gradient, front camera
/// a cool vignette. Values in 0..1.
fn scene_color(facing: CameraFacing, u: f32, v: f32) -> [f32; 3] {
    match facing {
        CameraFacing::Back => {
            let sky = 1.0 - v;
            [0.35 + 0.55 * u, 0.25 + 0.5 * sky, 0.2 + 0.6 * sky * (1.0 - u)]
        }
        CameraFacing::Front => {
            let du = u - 0.5;
            let dv = v - 0.5;
            let falloff = (1.0 - 2.0 * (du * du + dv * dv).sqrt()).max(0.0);
            [0.2 + 0.5 * falloff, 0.3 + 0.4 * falloff, 0.45 + 0.5 * falloff]
        }
    }
}

fn shade(value: f32, gain: f32) -> u8 {
    (value * gain * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Encode image as JPEG
fn encode_jpeg(image: &RgbImage, quality: u8) -> BackendResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);

    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality.clamp(1, 100));

    encoder
        .encode(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| BackendError::CaptureFailed(format!("JPEG encoding failed: {}", e)))?;

    Ok(buffer)
}
