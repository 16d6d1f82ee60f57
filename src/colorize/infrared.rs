// SPDX-License-Identifier: GPL-3.0-only

//! Infrared visualization (upper 8 bits as grayscale)

use super::{check_pixel_len, write_bgr};
use crate::constants::{BYTES_PER_PIXEL, INFRARED_SHIFT};
use crate::errors::ColorizeError;

/// 8-bit intensity of a raw infrared sample
#[inline]
pub fn infrared_intensity(ir: u16) -> u8 {
    (ir >> INFRARED_SHIFT) as u8
}

/// Colorize infrared samples into a BGRA pixel buffer
///
/// The padding byte of each pixel is not written.
pub fn colorize_infrared(infrared: &[u16], pixels: &mut [u8]) -> Result<(), ColorizeError> {
    check_pixel_len(infrared.len(), pixels)?;

    for (&ir, pixel) in infrared
        .iter()
        .zip(pixels.chunks_exact_mut(BYTES_PER_PIXEL))
    {
        let intensity = infrared_intensity(ir);
        write_bgr(pixel, [intensity, intensity, intensity]);
    }

    Ok(())
}
