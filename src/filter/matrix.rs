// SPDX-License-Identifier: MPL-2.0

//! 4x5 affine color matrix
//!
//! Row-major layout, one row per output channel (R, G, B, A):
//!
//! ```text
//! [ a b c d e ]      R' = a*R + b*G + c*B + d*A + e
//! [ f g h i j ]      G' = f*R + g*G + h*B + i*A + j
//! [ k l m n o ]      B' = k*R + l*G + m*B + n*A + o
//! [ p q r s t ]      A' = p*R + q*G + r*B + s*A + t
//! ```
//!
//! Channel values are on a 0..255 scale, so translation terms are too.

use crate::constants::color::{CHANNEL_MAX, LUMA_B, LUMA_G, LUMA_R};
use std::fmt;

/// Number of coefficients in a color matrix
pub const MATRIX_LEN: usize = 20;

/// Affine transform over RGBA channel values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix([f32; MATRIX_LEN]);

impl ColorMatrix {
    /// The identity transform
    pub const IDENTITY: ColorMatrix = ColorMatrix([
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    pub const fn from_array(values: [f32; MATRIX_LEN]) -> Self {
        Self(values)
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn as_array(&self) -> &[f32; MATRIX_LEN] {
        &self.0
    }

    /// One output row (5 coefficients)
    pub fn row(&self, index: usize) -> &[f32] {
        &self.0[index * 5..index * 5 + 5]
    }

    /// Luminance-preserving saturation transform
    ///
    /// `1.0` leaves colors untouched, `0.0` maps every pixel to its luma.
    pub fn saturation(sat: f32) -> Self {
        let inv = 1.0 - sat;
        let r = LUMA_R * inv;
        let g = LUMA_G * inv;
        let b = LUMA_B * inv;

        Self([
            r + sat, g, b, 0.0, 0.0, //
            r, g + sat, b, 0.0, 0.0, //
            r, g, b + sat, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// Per-channel RGB scale plus a constant offset; alpha passes through
    pub fn scale_translate(scale: f32, translate: f32) -> Self {
        Self([
            scale, 0.0, 0.0, 0.0, translate, //
            0.0, scale, 0.0, 0.0, translate, //
            0.0, 0.0, scale, 0.0, translate, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// Linear contrast about the channel midpoint
    pub fn contrast(contrast: f32) -> Self {
        Self::scale_translate(contrast, (-0.5 * contrast + 0.5) * CHANNEL_MAX)
    }

    /// Multiplicative brightness
    pub fn brightness(brightness: f32) -> Self {
        Self::scale_translate(brightness, 0.0)
    }

    /// Matrix from a 3x3 RGB mixing block, no offsets, alpha untouched
    pub fn from_rgb_rows(rows: [[f32; 3]; 3]) -> Self {
        let mut m = Self::IDENTITY;
        for (i, row) in rows.iter().enumerate() {
            m.0[i * 5..i * 5 + 3].copy_from_slice(row);
        }
        m
    }

    /// `outer ∘ inner`: the transform that applies `inner` first, then `outer`
    pub fn concat(outer: &ColorMatrix, inner: &ColorMatrix) -> Self {
        let a = &outer.0;
        let b = &inner.0;
        let mut out = [0.0f32; MATRIX_LEN];

        for row in 0..4 {
            let j = row * 5;
            for col in 0..4 {
                out[j + col] = a[j] * b[col]
                    + a[j + 1] * b[col + 5]
                    + a[j + 2] * b[col + 10]
                    + a[j + 3] * b[col + 15];
            }
            out[j + 4] =
                a[j] * b[4] + a[j + 1] * b[9] + a[j + 2] * b[14] + a[j + 3] * b[19] + a[j + 4];
        }

        Self(out)
    }

    /// Append `next` so it runs after everything already in `self`
    pub fn post_concat(&mut self, next: &ColorMatrix) {
        *self = Self::concat(next, self);
    }

    /// Prepend `prev` so it runs before everything already in `self`
    pub fn pre_concat(&mut self, prev: &ColorMatrix) {
        *self = Self::concat(self, prev);
    }

    /// Transform one RGBA value (0..255 scale), no clamping
    pub fn apply(&self, rgba: [f32; 4]) -> [f32; 4] {
        let m = &self.0;
        let mut out = [0.0f32; 4];
        for (row, value) in out.iter_mut().enumerate() {
            let j = row * 5;
            *value = m[j] * rgba[0]
                + m[j + 1] * rgba[1]
                + m[j + 2] * rgba[2]
                + m[j + 3] * rgba[3]
                + m[j + 4];
        }
        out
    }

    /// Apply to packed RGBA8 pixels in place, clamping each result channel
    ///
    /// Not used by the capture path: compiled filters are reported alongside
    /// the outcome but saved files keep the raw sensor output.
    pub fn apply_rgba8(&self, pixels: &mut [u8]) {
        for px in pixels.chunks_exact_mut(4) {
            let out = self.apply([px[0] as f32, px[1] as f32, px[2] as f32, px[3] as f32]);
            for (dst, value) in px.iter_mut().zip(out) {
                *dst = value.round().clamp(0.0, CHANNEL_MAX) as u8;
            }
        }
    }

    /// Coefficient-wise comparison with an absolute tolerance
    pub fn approx_eq(&self, other: &ColorMatrix, epsilon: f32) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    pub fn is_identity(&self) -> bool {
        self.approx_eq(&Self::IDENTITY, 1e-6)
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for ColorMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            let r = self.row(row);
            writeln!(
                f,
                "[{:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>10.4}]",
                r[0], r[1], r[2], r[3], r[4]
            )?;
        }
        Ok(())
    }
}
