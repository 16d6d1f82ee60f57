// SPDX-License-Identifier: GPL-3.0-only

//! Sensor and visualization constants
//!
//! Colors are given in the order they are written to the pixel buffer
//! (B, G, R).

/// Bytes per pixel in the display buffer (B, G, R, padding)
pub const BYTES_PER_PIXEL: usize = 4;

/// Depth sample value meaning "no reading"
pub const DEPTH_NO_DATA: u16 = 0;

/// Color for pixels without depth data (teal)
pub const DEPTH_NO_DATA_BGR: [u8; 3] = [41, 239, 242];

/// Color for pixels outside the reliable range (red)
pub const DEPTH_OUT_OF_RANGE_BGR: [u8; 3] = [25, 0, 255];

/// Depth units folded into one grayscale step
pub const DEPTH_GRAY_STEP_MM: u16 = 250;

/// Brightness added per grayscale step (20 steps span 0..=255)
pub const DEPTH_GRAY_STEP_VALUE: f64 = 12.75;

/// Typical reliable depth range reported by the sensor (millimeters)
pub const DEPTH_MIN_RELIABLE_MM: u16 = 500;
pub const DEPTH_MAX_RELIABLE_MM: u16 = 4500;

/// Right shift taking a 16-bit infrared sample to 8 bits
pub const INFRARED_SHIFT: u32 = 8;

/// Maximum number of bodies tracked at once
pub const BODY_COUNT: usize = 6;

/// Native stream resolutions
pub const COLOR_WIDTH: u32 = 1920;
pub const COLOR_HEIGHT: u32 = 1080;
pub const DEPTH_WIDTH: u32 = 512;
pub const DEPTH_HEIGHT: u32 = 424;

/// Body overlay layout (display pixels)
pub mod overlay {
    /// Preview is shown at half the color stream resolution
    pub const DISPLAY_SCALE: f32 = 0.5;
    /// Marker radius for the head joint
    pub const MARKER_RADIUS: f32 = 20.0;
    /// Label box offset from the projected joint
    pub const LABEL_BOX_OFFSET: (f32, f32) = (60.0, -100.0);
    /// Label text offset from the projected joint
    pub const LABEL_TEXT_OFFSET: (f32, f32) = (100.0, -80.0);
    /// Label box size relative to the marker radius
    pub const LABEL_BOX_WIDTH_FACTOR: f32 = 15.0;
    pub const LABEL_BOX_HEIGHT_FACTOR: f32 = 4.0;
    /// Label font size
    pub const LABEL_FONT_SIZE: f32 = 34.0;
}

/// Default labels attached to tracked bodies
pub const DEFAULT_LABELS: [&str; 8] = [
    "What is BizSpark?",
    "UMBC Rocks!",
    "Free software?",
    "HackUMBC!!!",
    "Azure cloud!",
    "Go Retrievers!",
    "Free T-shirts?",
    "Need caffeine...",
];

/// Default pause between viewer ticks (~30 fps)
pub const FRAME_INTERVAL_MS: u64 = 33;
