// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for depth, infrared and color conversion

use sensor_view::ColorizeError;
use sensor_view::colorize::{colorize_depth, colorize_infrared, depth_gray, yuy2_to_bgra};

const MIN: u16 = 500;
const MAX: u16 = 4500;

fn bgr(pixels: &[u8], index: usize) -> [u8; 3] {
    let i = index * 4;
    [pixels[i], pixels[i + 1], pixels[i + 2]]
}

#[test]
fn test_depth_concrete_examples() {
    let depth = [0u16, 5000, 1000];
    let mut pixels = vec![0u8; 12];
    colorize_depth(&depth, MIN, MAX, &mut pixels).unwrap();

    assert_eq!(bgr(&pixels, 0), [41, 239, 242]);
    assert_eq!(bgr(&pixels, 1), [25, 0, 255]);
    assert_eq!(bgr(&pixels, 2), [51, 51, 51]);
}

#[test]
fn test_depth_every_sample_value() {
    // Sweep the whole u16 domain in one frame
    let depth: Vec<u16> = (0..=u16::MAX).collect();
    let mut pixels = vec![0u8; depth.len() * 4];
    colorize_depth(&depth, MIN, MAX, &mut pixels).unwrap();

    for (i, &d) in depth.iter().enumerate() {
        let px = bgr(&pixels, i);
        if d == 0 {
            assert_eq!(px, [41, 239, 242], "sample {}", d);
        } else if d < MIN || d > MAX {
            assert_eq!(px, [25, 0, 255], "sample {}", d);
        } else {
            let expected = ((d / 250) as f64 * 12.75) as u32 as u8;
            assert_eq!(px, [expected, expected, expected], "sample {}", d);
        }
    }
}

#[test]
fn test_depth_ramp_is_monotonic_inside_range() {
    let mut prev = 0u8;
    for d in (MIN..=MAX).step_by(50) {
        let gray = depth_gray(d);
        assert!(gray >= prev, "ramp decreased at {}", d);
        prev = gray;
    }
}

#[test]
fn test_depth_padding_byte_untouched() {
    let depth = [0u16, 700, 9000];
    let mut pixels = vec![0xAAu8; 12];
    colorize_depth(&depth, MIN, MAX, &mut pixels).unwrap();
    for i in 0..3 {
        assert_eq!(pixels[i * 4 + 3], 0xAA);
    }
}

#[test]
fn test_infrared_concrete_example() {
    let ir = [0x1F40u16];
    let mut pixels = vec![0u8; 4];
    colorize_infrared(&ir, &mut pixels).unwrap();
    assert_eq!(bgr(&pixels, 0), [31, 31, 31]);
}

#[test]
fn test_infrared_every_sample_value() {
    let ir: Vec<u16> = (0..=u16::MAX).step_by(7).collect();
    let mut pixels = vec![0u8; ir.len() * 4];
    colorize_infrared(&ir, &mut pixels).unwrap();
    for (i, &s) in ir.iter().enumerate() {
        let v = (s >> 8) as u8;
        assert_eq!(bgr(&pixels, i), [v, v, v]);
    }
}

#[test]
fn test_conversions_are_repeatable() {
    let depth: Vec<u16> = (0..512).map(|i| (i * 13) as u16).collect();
    let mut first = vec![0u8; depth.len() * 4];
    let mut second = vec![0u8; depth.len() * 4];
    colorize_depth(&depth, MIN, MAX, &mut first).unwrap();
    colorize_depth(&depth, MIN, MAX, &mut second).unwrap();
    assert_eq!(first, second);

    colorize_infrared(&depth, &mut first).unwrap();
    colorize_infrared(&depth, &mut second).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_size_mismatch_rejected_before_write() {
    let samples = [1000u16; 8];
    for len in [0usize, 4, 31, 33, 64] {
        let mut pixels = vec![0x5Au8; len];
        assert_eq!(
            colorize_depth(&samples, MIN, MAX, &mut pixels),
            Err(ColorizeError::SizeMismatch {
                expected: 32,
                actual: len
            })
        );
        assert!(colorize_infrared(&samples, &mut pixels).is_err());
        assert!(pixels.iter().all(|&b| b == 0x5A));
    }
}

#[test]
fn test_empty_frame_is_valid() {
    let mut pixels: Vec<u8> = Vec::new();
    assert!(colorize_depth(&[], MIN, MAX, &mut pixels).is_ok());
    assert!(colorize_infrared(&[], &mut pixels).is_ok());
}

#[test]
fn test_yuy2_gray_frame() {
    let src = [128u8, 128, 128, 128];
    let mut pixels = vec![0u8; 8];
    yuy2_to_bgra(&src, &mut pixels).unwrap();
    assert_eq!(pixels, vec![128, 128, 128, 255, 128, 128, 128, 255]);
}
