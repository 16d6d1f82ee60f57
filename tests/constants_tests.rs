// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use sensor_view::colorize::depth_gray;
use sensor_view::constants::{
    BODY_COUNT, DEFAULT_LABELS, DEPTH_GRAY_STEP_MM, DEPTH_MAX_RELIABLE_MM, DEPTH_MIN_RELIABLE_MM,
};

#[test]
fn test_ramp_has_twenty_steps() {
    // 20 steps of 250 units reach full brightness at 5000
    assert_eq!(depth_gray(20 * DEPTH_GRAY_STEP_MM), 255);
    assert_eq!(depth_gray(20 * DEPTH_GRAY_STEP_MM - 1), 242);
}

#[test]
fn test_default_range_stays_on_ramp() {
    assert!(DEPTH_MIN_RELIABLE_MM < DEPTH_MAX_RELIABLE_MM);
    assert!(DEPTH_MAX_RELIABLE_MM < 20 * DEPTH_GRAY_STEP_MM);
}

#[test]
fn test_roster_and_labels() {
    assert_eq!(BODY_COUNT, 6);
    for label in DEFAULT_LABELS {
        assert!(!label.is_empty());
    }
}
