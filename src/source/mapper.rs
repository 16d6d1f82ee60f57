// SPDX-License-Identifier: GPL-3.0-only

//! Pinhole projection into the color camera
//!
//! Stand-in for the sensor's own coordinate mapper. Reference resolution is
//! the 1920x1080 color stream.

use super::{CameraSpacePoint, ColorSpacePoint, CoordinateMapper};

/// Focal length X (pixels) at 1920x1080
pub const FX: f32 = 1081.37;
/// Focal length Y (pixels) at 1920x1080
pub const FY: f32 = 1081.37;
/// Principal point X (pixels) at 1920x1080
pub const CX: f32 = 959.5;
/// Principal point Y (pixels) at 1920x1080
pub const CY: f32 = 539.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeMapper {
    pub fx: f32,
    pub fy: f32,
    pub cx: f32,
    pub cy: f32,
}

impl Default for PinholeMapper {
    fn default() -> Self {
        Self {
            fx: FX,
            fy: FY,
            cx: CX,
            cy: CY,
        }
    }
}

impl CoordinateMapper for PinholeMapper {
    fn map_camera_point_to_color_space(&self, point: CameraSpacePoint) -> ColorSpacePoint {
        if point.z <= 0.0 {
            return ColorSpacePoint {
                x: f32::NEG_INFINITY,
                y: f32::NEG_INFINITY,
            };
        }
        // Sensor Y points up, image Y points down
        ColorSpacePoint {
            x: self.fx * point.x / point.z + self.cx,
            y: self.cy - self.fy * point.y / point.z,
        }
    }
}
