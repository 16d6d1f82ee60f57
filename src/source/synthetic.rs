// SPDX-License-Identifier: GPL-3.0-only

//! Deterministic frame source for tests and offline runs
//!
//! Produces a depth ramp with a no-data band on the left edge and
//! out-of-range regions at both ends, a scrolling infrared gradient, color
//! bars, and a scripted roster in which bodies enter, leave and get replaced.

use super::{
    Body, CameraSpacePoint, ColorFrame, ColorImageFormat, DepthFrame, FrameDescription,
    FrameSource, HandState, InfraredFrame, Joint, JointType,
};
use crate::constants::{BODY_COUNT, DEPTH_MAX_RELIABLE_MM, DEPTH_MIN_RELIABLE_MM};

/// Width of the no-data band on the left edge of the depth frame
const NO_DATA_COLUMNS: u32 = 8;
/// Ticks between roster changes
const ROSTER_PERIOD: u64 = 90;

const COLOR_BARS_BGR: [[u8; 3]; 8] = [
    [255, 255, 255],
    [0, 255, 255],
    [255, 255, 0],
    [0, 255, 0],
    [255, 0, 255],
    [0, 0, 255],
    [255, 0, 0],
    [0, 0, 0],
];

#[derive(Debug, Clone)]
pub struct SyntheticSource {
    color: FrameDescription,
    depth: FrameDescription,
    color_format: ColorImageFormat,
    /// Deliver a color frame every `color_every` ticks
    color_every: u64,
    tick: u64,
}

impl SyntheticSource {
    pub fn new(color: FrameDescription, depth: FrameDescription) -> Self {
        Self {
            color,
            depth,
            color_format: ColorImageFormat::Bgra,
            color_every: 1,
            tick: 0,
        }
    }

    pub fn with_color_format(mut self, format: ColorImageFormat) -> Self {
        self.color_format = format;
        self
    }

    /// Only deliver color on every `n`th tick (others report no frame)
    pub fn with_color_every(mut self, n: u64) -> Self {
        self.color_every = n.max(1);
        self
    }

    /// Advance to the next tick; frames polled afterwards belong to it
    pub fn advance(&mut self) {
        self.tick += 1;
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn color_description(&self) -> FrameDescription {
        self.color
    }

    pub fn depth_description(&self) -> FrameDescription {
        self.depth
    }

    fn depth_at(&self, x: u32) -> u16 {
        if x < NO_DATA_COLUMNS {
            return 0;
        }
        // 300..5300 mm across the frame, drifting slowly with time
        let span = 5000u64 * (x - NO_DATA_COLUMNS) as u64
            / (self.depth.width.saturating_sub(NO_DATA_COLUMNS)).max(1) as u64;
        let drift = (self.tick % 50) * 2;
        (300 + span + drift).min(u16::MAX as u64) as u16
    }

    fn color_pixel(&self, x: u32) -> [u8; 3] {
        let bar = (x as usize * COLOR_BARS_BGR.len()) / self.color.width.max(1) as usize;
        COLOR_BARS_BGR[bar.min(COLOR_BARS_BGR.len() - 1)]
    }

    fn roster(&self) -> Vec<Body> {
        let phase = self.tick / ROSTER_PERIOD;
        let t = (self.tick % ROSTER_PERIOD) as f32 / ROSTER_PERIOD as f32;
        let sway = (t * std::f32::consts::TAU).sin() * 0.2;

        let mut bodies = vec![Body::default(); BODY_COUNT];

        // Slot 0 keeps one person for the whole run
        bodies[0] = Body::with_head(
            1,
            CameraSpacePoint {
                x: -0.6 + sway,
                y: 0.4,
                z: 2.5,
            },
        );
        with_hands(&mut bodies[0], HandState::Open, HandState::Closed);

        // Slot 1 is handed to a new person every period
        bodies[1] = Body::with_head(
            100 + phase,
            CameraSpacePoint {
                x: 0.5,
                y: 0.3 + sway,
                z: 3.0,
            },
        );
        with_hands(&mut bodies[1], HandState::Unknown, HandState::Lasso);

        // Slot 2 is only present on odd periods, with its head at the sensor
        // plane so projection fails
        if phase % 2 == 1 {
            bodies[2] = Body::with_head(
                50,
                CameraSpacePoint {
                    x: 0.0,
                    y: 0.0,
                    z: 0.0,
                },
            );
        }

        bodies
    }
}

/// Put both hands beside the head, slightly nearer the sensor
fn with_hands(body: &mut Body, left: HandState, right: HandState) {
    let Some(head) = body.joint(JointType::Head).map(|j| j.position) else {
        return;
    };
    body.joints.insert(
        JointType::HandLeft,
        Joint::tracked(head.x - 0.3, head.y - 0.4, head.z - 0.2),
    );
    body.joints.insert(
        JointType::HandRight,
        Joint::tracked(head.x + 0.3, head.y - 0.4, head.z - 0.2),
    );
    body.hand_left = left;
    body.hand_right = right;
}

impl FrameSource for SyntheticSource {
    fn poll_color(&mut self) -> Option<ColorFrame> {
        if self.tick % self.color_every != 0 {
            return None;
        }

        let data = match self.color_format {
            ColorImageFormat::Bgra => {
                let mut data = Vec::with_capacity(self.color.bgra_len());
                for _y in 0..self.color.height {
                    for x in 0..self.color.width {
                        let [b, g, r] = self.color_pixel(x);
                        data.extend_from_slice(&[b, g, r, 255]);
                    }
                }
                data
            }
            ColorImageFormat::Yuy2 => {
                // Luma ramp with neutral chroma
                let mut data = Vec::with_capacity(self.color.pixel_count() * 2);
                for _y in 0..self.color.height {
                    for x in 0..self.color.width {
                        let luma = (x * 255 / self.color.width.max(1)) as u8;
                        data.push(luma);
                        data.push(128);
                    }
                }
                data
            }
        };

        Some(ColorFrame {
            description: self.color,
            format: self.color_format,
            data,
        })
    }

    fn poll_depth(&mut self) -> Option<DepthFrame> {
        let mut data = Vec::with_capacity(self.depth.pixel_count());
        for _y in 0..self.depth.height {
            for x in 0..self.depth.width {
                data.push(self.depth_at(x));
            }
        }
        Some(DepthFrame {
            description: self.depth,
            data,
            min_reliable: DEPTH_MIN_RELIABLE_MM,
            max_reliable: DEPTH_MAX_RELIABLE_MM,
        })
    }

    fn poll_infrared(&mut self) -> Option<InfraredFrame> {
        let mut data = Vec::with_capacity(self.depth.pixel_count());
        for y in 0..self.depth.height {
            for x in 0..self.depth.width {
                let level = (x + y + self.tick as u32) % 256;
                data.push((level << 8) as u16);
            }
        }
        Some(InfraredFrame {
            description: self.depth,
            data,
        })
    }

    fn poll_bodies(&mut self) -> Option<Vec<Body>> {
        Some(self.roster())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> SyntheticSource {
        SyntheticSource::new(FrameDescription::new(64, 36), FrameDescription::new(64, 8))
    }

    #[test]
    fn test_depth_has_all_regions() {
        let mut src = source();
        let frame = src.poll_depth().unwrap();
        assert_eq!(frame.data.len(), 64 * 8);
        assert!(frame.data.contains(&0));
        assert!(frame.data.iter().any(|&d| d != 0 && d < frame.min_reliable));
        assert!(frame.data.iter().any(|&d| d > frame.max_reliable));
        assert!(
            frame
                .data
                .iter()
                .any(|&d| d >= frame.min_reliable && d <= frame.max_reliable)
        );
    }

    #[test]
    fn test_color_every_skips_ticks() {
        let mut src = source().with_color_every(2);
        assert!(src.poll_color().is_some());
        src.advance();
        assert!(src.poll_color().is_none());
        src.advance();
        assert!(src.poll_color().is_some());
    }

    #[test]
    fn test_yuy2_frame_size() {
        let mut src = source().with_color_format(ColorImageFormat::Yuy2);
        let frame = src.poll_color().unwrap();
        assert_eq!(frame.data.len(), 64 * 36 * 2);
    }

    #[test]
    fn test_roster_replaces_slot_one() {
        let mut src = source();
        let first = src.poll_bodies().unwrap();
        for _ in 0..ROSTER_PERIOD {
            src.advance();
        }
        let later = src.poll_bodies().unwrap();
        assert_eq!(first.len(), BODY_COUNT);
        assert_eq!(first[0].tracking_id, later[0].tracking_id);
        assert_ne!(first[1].tracking_id, later[1].tracking_id);
        assert!(!first[2].is_tracked);
        assert!(later[2].is_tracked);
    }
}
