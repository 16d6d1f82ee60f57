// SPDX-License-Identifier: GPL-3.0-only

//! Depth visualization
//!
//! - No data: teal
//! - Outside the reliable range: red
//! - Otherwise a 20-step grayscale ramp (near=dark, far=bright)

use super::{check_pixel_len, write_bgr};
use crate::constants::{
    BYTES_PER_PIXEL, DEPTH_GRAY_STEP_MM, DEPTH_GRAY_STEP_VALUE, DEPTH_NO_DATA, DEPTH_NO_DATA_BGR,
    DEPTH_OUT_OF_RANGE_BGR,
};
use crate::errors::ColorizeError;

/// Grayscale level for a depth sample
///
/// Each 250-unit band maps to one 12.75 brightness step. The product is
/// truncated and then narrowed to 8 bits, so depths beyond ~5000 units wrap
/// around instead of saturating.
#[inline]
pub fn depth_gray(depth: u16) -> u8 {
    let steps = (depth / DEPTH_GRAY_STEP_MM) as f64;
    (steps * DEPTH_GRAY_STEP_VALUE) as u32 as u8
}

/// Colorize depth samples into a BGRA pixel buffer
///
/// # Arguments
/// * `depth` - Depth samples, row-major (0 = no data)
/// * `min_reliable` - Smallest trusted depth (inclusive)
/// * `max_reliable` - Largest trusted depth (inclusive)
/// * `pixels` - Output buffer, exactly `depth.len() * 4` bytes
///
/// The padding byte of each pixel is not written.
pub fn colorize_depth(
    depth: &[u16],
    min_reliable: u16,
    max_reliable: u16,
    pixels: &mut [u8],
) -> Result<(), ColorizeError> {
    check_pixel_len(depth.len(), pixels)?;

    for (&d, pixel) in depth.iter().zip(pixels.chunks_exact_mut(BYTES_PER_PIXEL)) {
        let bgr = if d == DEPTH_NO_DATA {
            DEPTH_NO_DATA_BGR
        } else if d < min_reliable || d > max_reliable {
            DEPTH_OUT_OF_RANGE_BGR
        } else {
            let gray = depth_gray(d);
            [gray, gray, gray]
        };
        write_bgr(pixel, bgr);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_gray_steps() {
        assert_eq!(depth_gray(0), 0);
        assert_eq!(depth_gray(249), 0);
        assert_eq!(depth_gray(250), 12);
        assert_eq!(depth_gray(1000), 51);
        assert_eq!(depth_gray(4500), 229);
        assert_eq!(depth_gray(5000), 255);
    }

    #[test]
    fn test_depth_gray_wraps_past_ramp() {
        // 21 steps * 12.75 = 267.75 -> 267 -> 11
        assert_eq!(depth_gray(5250), 11);
    }

    #[test]
    fn test_depth_sentinels() {
        let depth = vec![0u16, 5000, 1000, 400];
        let mut pixels = vec![7u8; 16];
        colorize_depth(&depth, 500, 4500, &mut pixels).unwrap();

        assert_eq!(&pixels[0..4], &[41, 239, 242, 7]);
        assert_eq!(&pixels[4..8], &[25, 0, 255, 7]);
        assert_eq!(&pixels[8..12], &[51, 51, 51, 7]);
        assert_eq!(&pixels[12..16], &[25, 0, 255, 7]);
    }

    #[test]
    fn test_depth_bounds_inclusive() {
        let depth = vec![500u16, 4500];
        let mut pixels = vec![0u8; 8];
        colorize_depth(&depth, 500, 4500, &mut pixels).unwrap();
        assert_eq!(&pixels[0..3], &[25, 25, 25]);
        assert_eq!(&pixels[4..7], &[229, 229, 229]);
    }

    #[test]
    fn test_depth_size_mismatch_leaves_buffer() {
        let depth = vec![1000u16; 4];
        let mut pixels = vec![9u8; 15];
        let err = colorize_depth(&depth, 500, 4500, &mut pixels).unwrap_err();
        assert_eq!(
            err,
            ColorizeError::SizeMismatch {
                expected: 16,
                actual: 15
            }
        );
        assert!(pixels.iter().all(|&b| b == 9));
    }
}
