// SPDX-License-Identifier: GPL-3.0-only

//! Color stream conversion to BGRA

use super::check_pixel_len;
use crate::constants::BYTES_PER_PIXEL;
use crate::errors::ColorizeError;
use crate::source::{ColorFrame, ColorImageFormat};

/// Copy a frame that already arrives as BGRA
pub fn copy_bgra(src: &[u8], pixels: &mut [u8]) -> Result<(), ColorizeError> {
    if src.len() != pixels.len() {
        return Err(ColorizeError::SizeMismatch {
            expected: src.len(),
            actual: pixels.len(),
        });
    }
    pixels.copy_from_slice(src);
    Ok(())
}

/// Convert YUY2 (YUV 4:2:2) to BGRA
///
/// YUY2 format: Y0 U Y1 V - each 4-byte group encodes 2 pixels.
/// Uses BT.601 coefficients; alpha is set to 255.
pub fn yuy2_to_bgra(src: &[u8], pixels: &mut [u8]) -> Result<(), ColorizeError> {
    if src.len() % 4 != 0 {
        return Err(ColorizeError::UnalignedColor { len: src.len() });
    }
    check_pixel_len(src.len() / 2, pixels)?;

    for (chunk, out) in src
        .chunks_exact(4)
        .zip(pixels.chunks_exact_mut(2 * BYTES_PER_PIXEL))
    {
        let u = chunk[1];
        let v = chunk[3];
        let (first, second) = out.split_at_mut(BYTES_PER_PIXEL);
        for (y, pixel) in [(chunk[0], first), (chunk[2], second)] {
            let (r, g, b) = yuv_to_rgb(y, u, v);
            pixel.copy_from_slice(&[b, g, r, 255]);
        }
    }

    Ok(())
}

/// Convert one color frame into the display buffer according to its raw format
pub fn convert_color_frame(frame: &ColorFrame, pixels: &mut [u8]) -> Result<(), ColorizeError> {
    match frame.format {
        ColorImageFormat::Bgra => copy_bgra(&frame.data, pixels),
        ColorImageFormat::Yuy2 => yuy2_to_bgra(&frame.data, pixels),
    }
}

/// Convert YUV (BT.601) to RGB
#[inline]
fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let y = y as f32;
    let u = u as f32 - 128.0;
    let v = v as f32 - 128.0;

    let r = (y + 1.402 * v).clamp(0.0, 255.0) as u8;
    let g = (y - 0.344136 * u - 0.714136 * v).clamp(0.0, 255.0) as u8;
    let b = (y + 1.772 * u).clamp(0.0, 255.0) as u8;

    (r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yuy2_neutral_chroma_is_gray() {
        let src = vec![128u8, 128, 64, 128];
        let mut pixels = vec![0u8; 8];
        yuy2_to_bgra(&src, &mut pixels).unwrap();
        assert_eq!(pixels, vec![128, 128, 128, 255, 64, 64, 64, 255]);
    }

    #[test]
    fn test_yuy2_red_chroma() {
        // Strong V pushes red up and green down
        let src = vec![128u8, 128, 128, 255];
        let mut pixels = vec![0u8; 8];
        yuy2_to_bgra(&src, &mut pixels).unwrap();
        assert_eq!(pixels[2], 255);
        assert!(pixels[1] < 128);
        assert_eq!(pixels[0], 128);
    }

    #[test]
    fn test_yuy2_unaligned() {
        let mut pixels = vec![0u8; 12];
        assert_eq!(
            yuy2_to_bgra(&[0u8; 6], &mut pixels),
            Err(ColorizeError::UnalignedColor { len: 6 })
        );
    }

    #[test]
    fn test_copy_bgra_mismatch() {
        let mut pixels = vec![0u8; 4];
        assert!(copy_bgra(&[1u8; 8], &mut pixels).is_err());
        assert_eq!(pixels, vec![0u8; 4]);
    }
}
