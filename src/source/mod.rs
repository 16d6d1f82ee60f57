// SPDX-License-Identifier: GPL-3.0-only

//! Frame source abstraction
//!
//! A sensor session exposes one non-blocking poll per stream. `None` means no
//! frame was ready this tick; the viewer then skips that stream until the
//! next tick. Frames are owned values, so whatever the source handed out is
//! released when the tick's processing scope ends.

mod mapper;
mod synthetic;
mod types;

pub use mapper::PinholeMapper;
pub use synthetic::SyntheticSource;
pub use types::*;

/// Non-blocking access to the latest frame of each stream
pub trait FrameSource {
    fn poll_color(&mut self) -> Option<ColorFrame>;
    fn poll_depth(&mut self) -> Option<DepthFrame>;
    fn poll_infrared(&mut self) -> Option<InfraredFrame>;
    /// Full body roster, including untracked slots
    fn poll_bodies(&mut self) -> Option<Vec<Body>>;
}

/// Projection from sensor space into color image space
///
/// Implementations may return non-finite coordinates for points they cannot
/// project (behind the sensor, outside the field of view).
pub trait CoordinateMapper {
    fn map_camera_point_to_color_space(&self, point: CameraSpacePoint) -> ColorSpacePoint;
}

impl<F> CoordinateMapper for F
where
    F: Fn(CameraSpacePoint) -> ColorSpacePoint,
{
    fn map_camera_point_to_color_space(&self, point: CameraSpacePoint) -> ColorSpacePoint {
        self(point)
    }
}
