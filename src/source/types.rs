// SPDX-License-Identifier: GPL-3.0-only

//! Frame and body types delivered by a frame source

use std::collections::HashMap;

use crate::constants::BYTES_PER_PIXEL;

/// Dimensions of one stream's frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameDescription {
    pub width: u32,
    pub height: u32,
}

impl FrameDescription {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels in one frame
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size of the matching BGRA display buffer in bytes
    pub fn bgra_len(&self) -> usize {
        self.pixel_count() * BYTES_PER_PIXEL
    }

    /// Row stride of the BGRA display buffer in bytes
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }
}

impl std::fmt::Display for FrameDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Raw pixel layout of a color frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorImageFormat {
    /// 4 bytes per pixel, already in display order
    #[default]
    Bgra,
    /// Packed 4:2:2, Y0 U Y1 V
    Yuy2,
}

impl ColorImageFormat {
    /// Bytes per pixel of the raw data
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            ColorImageFormat::Bgra => 4,
            ColorImageFormat::Yuy2 => 2,
        }
    }
}

/// One color frame
#[derive(Debug, Clone)]
pub struct ColorFrame {
    pub description: FrameDescription,
    pub format: ColorImageFormat,
    pub data: Vec<u8>,
}

/// One depth frame with the sensor's reliable range
#[derive(Debug, Clone)]
pub struct DepthFrame {
    pub description: FrameDescription,
    /// Depth in millimeters, 0 = no data
    pub data: Vec<u16>,
    pub min_reliable: u16,
    pub max_reliable: u16,
}

/// One infrared frame
#[derive(Debug, Clone)]
pub struct InfraredFrame {
    pub description: FrameDescription,
    pub data: Vec<u16>,
}

/// Point in sensor space (meters, Y up, Z away from the sensor)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraSpacePoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Point in color image space (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorSpacePoint {
    pub x: f32,
    pub y: f32,
}

impl ColorSpacePoint {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Body joints reported by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointType {
    SpineBase,
    SpineMid,
    Neck,
    Head,
    ShoulderLeft,
    ElbowLeft,
    WristLeft,
    HandLeft,
    ShoulderRight,
    ElbowRight,
    WristRight,
    HandRight,
    HipLeft,
    KneeLeft,
    AnkleLeft,
    FootLeft,
    HipRight,
    KneeRight,
    AnkleRight,
    FootRight,
    SpineShoulder,
    HandTipLeft,
    ThumbLeft,
    HandTipRight,
    ThumbRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    #[default]
    NotTracked,
    Inferred,
    Tracked,
}

/// Hand pose reported by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandState {
    #[default]
    Unknown,
    NotTracked,
    Open,
    Closed,
    Lasso,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Joint {
    pub position: CameraSpacePoint,
    pub tracking_state: TrackingState,
}

impl Joint {
    pub fn tracked(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: CameraSpacePoint { x, y, z },
            tracking_state: TrackingState::Tracked,
        }
    }
}

/// One entry of the body roster
#[derive(Debug, Clone, Default)]
pub struct Body {
    /// Sensor-assigned identity, stable while the body stays tracked
    pub tracking_id: u64,
    pub is_tracked: bool,
    pub joints: HashMap<JointType, Joint>,
    pub hand_left: HandState,
    pub hand_right: HandState,
}

impl Body {
    /// A tracked body with only its head joint
    pub fn with_head(tracking_id: u64, head: CameraSpacePoint) -> Self {
        let mut joints = HashMap::new();
        joints.insert(
            JointType::Head,
            Joint {
                position: head,
                tracking_state: TrackingState::Tracked,
            },
        );
        Self {
            tracking_id,
            is_tracked: true,
            joints,
            ..Default::default()
        }
    }

    pub fn joint(&self, joint_type: JointType) -> Option<&Joint> {
        self.joints.get(&joint_type)
    }
}
