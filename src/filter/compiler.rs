// SPDX-License-Identifier: MPL-2.0

//! Compile a [`FilterSpec`] into one composed [`ColorMatrix`]
//!
//! Stages are appended in a fixed order, each running after the previous:
//!
//! ```text
//! identity → saturation → contrast → brightness → sepia (optional)
//! ```
//!
//! Coefficients are never clamped here.

use super::FilterSpec;
use super::matrix::ColorMatrix;
use crate::constants::color::SEPIA_ROWS;
use tracing::debug;

/// Fixed sepia tone matrix
pub fn sepia_matrix() -> ColorMatrix {
    ColorMatrix::from_rgb_rows(SEPIA_ROWS)
}

pub fn compile(spec: &FilterSpec) -> ColorMatrix {
    let mut matrix = ColorMatrix::identity();

    matrix.post_concat(&ColorMatrix::saturation(spec.saturation));
    matrix.post_concat(&ColorMatrix::contrast(spec.contrast));
    matrix.post_concat(&ColorMatrix::brightness(spec.brightness));

    if spec.sepia {
        matrix.post_concat(&sepia_matrix());
    }

    debug!(
        brightness = spec.brightness,
        contrast = spec.contrast,
        saturation = spec.saturation,
        sepia = spec.sepia,
        identity = matrix.is_identity(),
        "Compiled filter matrix"
    );

    matrix
}
