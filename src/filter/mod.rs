// SPDX-License-Identifier: MPL-2.0

//! Color filter compiler
//!
//! Turns a declarative filter description into a single composed color
//! matrix:
//!
//! ```text
//! "<filter name='contrast' value='1.2'/>" ──parse──▶ FilterSpec ──compile──▶ ColorMatrix
//! ```

pub mod compiler;
pub mod matrix;
pub mod parser;

pub use compiler::{compile, sepia_matrix};
pub use matrix::ColorMatrix;
pub use parser::parse;

/// Parsed filter parameters
///
/// Every factor defaults to `1.0` (no change) and sepia is off, so the
/// default spec compiles to the identity matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    /// Multiplicative brightness
    pub brightness: f32,
    /// Contrast about the channel midpoint
    pub contrast: f32,
    /// 1.0 = unchanged, 0.0 = greyscale
    pub saturation: f32,
    pub sepia: bool,
}

impl FilterSpec {
    pub const DEFAULT_FACTOR: f32 = 1.0;
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            brightness: Self::DEFAULT_FACTOR,
            contrast: Self::DEFAULT_FACTOR,
            saturation: Self::DEFAULT_FACTOR,
            sepia: false,
        }
    }
}

/// Parse and compile in one step
pub fn compile_xml(xml: &str) -> ColorMatrix {
    compile(&parse(xml))
}
