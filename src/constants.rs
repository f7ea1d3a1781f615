// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Directory name used under the platform data/config directories
pub const APP_DIR_NAME: &str = "shutter";

/// Folder inside the app data directory where captured photos land
pub const PHOTO_FOLDER: &str = "pictures";

/// Configuration file name inside the app config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Captured photo file naming
pub mod photo {
    /// File name prefix (`IMG_20240131_235959.jpg`)
    pub const FILE_PREFIX: &str = "IMG_";
    /// File extension of captured photos
    pub const FILE_EXTENSION: &str = "jpg";
    /// chrono format string for the timestamp part (second resolution)
    pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
}

/// Zoom factor range exposed to callers
///
/// The factor maps linearly onto the device's normalized `[0, 1]` linear zoom.
pub mod zoom {
    /// Zoom factor that maps to linear zoom 0.0
    pub const MIN_FACTOR: f32 = 1.0;
    /// Zoom factor that maps to linear zoom 1.0
    pub const MAX_FACTOR: f32 = 4.0;
}

/// Color matrix coefficients
pub mod color {
    /// Luminance weights used by the saturation transform (R, G, B)
    pub const LUMA_R: f32 = 0.213;
    pub const LUMA_G: f32 = 0.715;
    pub const LUMA_B: f32 = 0.072;

    /// Contrast pivots around the channel midpoint (127.5 on a 0..255 scale)
    pub const CHANNEL_MAX: f32 = 255.0;

    /// Sepia tone rows (R, G, B output rows over R, G, B input)
    pub const SEPIA_ROWS: [[f32; 3]; 3] = [
        [0.393, 0.769, 0.189],
        [0.349, 0.686, 0.168],
        [0.272, 0.534, 0.131],
    ];
}

/// Virtual camera defaults
pub mod virtual_camera {
    pub const DEFAULT_WIDTH: u32 = 640;
    pub const DEFAULT_HEIGHT: u32 = 480;
    pub const DEFAULT_JPEG_QUALITY: u8 = 92;
    /// Gain applied to the synthetic scene while the torch is on
    pub const TORCH_GAIN: f32 = 1.35;
}
