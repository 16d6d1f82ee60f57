// SPDX-License-Identifier: GPL-3.0-only

//! Sensor sample to display pixel conversion
//!
//! Every converter writes into a caller-owned BGRA buffer (4 bytes per pixel,
//! stride = width * 4) and validates its length before touching it, so a
//! rejected call leaves the buffer exactly as it was.

mod color;
mod depth;
mod infrared;

pub use color::{convert_color_frame, copy_bgra, yuy2_to_bgra};
pub use depth::{colorize_depth, depth_gray};
pub use infrared::{colorize_infrared, infrared_intensity};

use crate::constants::BYTES_PER_PIXEL;
use crate::errors::ColorizeError;

/// Check that `pixels` holds exactly one BGRA pixel per sample
#[inline]
pub(crate) fn check_pixel_len(sample_count: usize, pixels: &[u8]) -> Result<(), ColorizeError> {
    let expected = sample_count * BYTES_PER_PIXEL;
    if pixels.len() != expected {
        return Err(ColorizeError::SizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Write a B, G, R triplet into one pixel, leaving the padding byte alone
#[inline]
pub(crate) fn write_bgr(pixel: &mut [u8], bgr: [u8; 3]) {
    pixel[..3].copy_from_slice(&bgr);
}

/// Convert a BGRA buffer to RGBA with opaque alpha
///
/// Display surfaces that want RGBA (PNG export, terminal preview) go through
/// this; the padding byte is never trusted.
pub fn bgra_to_rgba(bgra: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(bgra.len());
    for chunk in bgra.chunks_exact(BYTES_PER_PIXEL) {
        rgba.push(chunk[2]); // R
        rgba.push(chunk[1]); // G
        rgba.push(chunk[0]); // B
        rgba.push(255); // A
    }
    rgba
}
