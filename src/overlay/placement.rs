// SPDX-License-Identifier: GPL-3.0-only

//! Label and hand marker layout in display space

use serde::{Deserialize, Serialize};

use crate::constants::overlay::{
    DISPLAY_SCALE, LABEL_BOX_HEIGHT_FACTOR, LABEL_BOX_OFFSET, LABEL_BOX_WIDTH_FACTOR,
    LABEL_FONT_SIZE, LABEL_TEXT_OFFSET, MARKER_RADIUS,
};
use crate::errors::OverlayError;
use crate::source::{Body, ColorSpacePoint, CoordinateMapper, HandState, JointType, TrackingState};

/// Geometry used to place overlay elements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelLayout {
    /// Display pixels per color-space pixel
    pub display_scale: f32,
    pub marker_radius: f32,
    pub box_offset: (f32, f32),
    pub text_offset: (f32, f32),
    pub font_size: f32,
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self {
            display_scale: DISPLAY_SCALE,
            marker_radius: MARKER_RADIUS,
            box_offset: LABEL_BOX_OFFSET,
            text_offset: LABEL_TEXT_OFFSET,
            font_size: LABEL_FONT_SIZE,
        }
    }
}

/// Axis-aligned rectangle in display pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A label ready to be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub tracking_id: u64,
    pub text: String,
    /// Projected head joint in display pixels
    pub anchor: (f32, f32),
    /// Ellipse behind the text
    pub bubble: Rect,
    /// Top-left of the text block
    pub text_origin: (f32, f32),
    pub font_size: f32,
}

/// A colored marker on a hand joint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandMarker {
    pub tracking_id: u64,
    pub joint: JointType,
    pub center: (f32, f32),
    pub radius: f32,
    /// RGB
    pub color: [u8; 3],
}

impl HandState {
    /// Marker color for hand poses worth highlighting (RGB)
    pub fn marker_color(&self) -> Option<[u8; 3]> {
        match self {
            HandState::Open => Some([0, 128, 0]),
            HandState::Closed => Some([255, 0, 0]),
            HandState::Lasso => Some([0, 255, 255]),
            HandState::Unknown | HandState::NotTracked => None,
        }
    }
}

impl LabelLayout {
    /// Project a tracked joint of `body` into display pixels
    pub fn project_joint<M: CoordinateMapper + ?Sized>(
        &self,
        body: &Body,
        joint_type: JointType,
        mapper: &M,
    ) -> Result<(f32, f32), OverlayError> {
        let joint = body
            .joint(joint_type)
            .filter(|j| j.tracking_state == TrackingState::Tracked)
            .ok_or(OverlayError::JointNotTracked)?;

        let point: ColorSpacePoint = mapper.map_camera_point_to_color_space(joint.position);
        if !point.is_finite() {
            return Err(OverlayError::ProjectionFailure);
        }
        Ok((point.x * self.display_scale, point.y * self.display_scale))
    }

    /// Place `text` next to the head of `body`
    pub fn place_label<M: CoordinateMapper + ?Sized>(
        &self,
        body: &Body,
        text: &str,
        mapper: &M,
    ) -> Result<LabelPlacement, OverlayError> {
        let (x, y) = self.project_joint(body, JointType::Head, mapper)?;

        Ok(LabelPlacement {
            tracking_id: body.tracking_id,
            text: text.to_string(),
            anchor: (x, y),
            bubble: Rect {
                x: x + self.box_offset.0,
                y: y + self.box_offset.1,
                width: self.marker_radius * LABEL_BOX_WIDTH_FACTOR,
                height: self.marker_radius * LABEL_BOX_HEIGHT_FACTOR,
            },
            text_origin: (x + self.text_offset.0, y + self.text_offset.1),
            font_size: self.font_size,
        })
    }

    /// Markers for hands in a highlighted pose
    ///
    /// Hands that fail to project are left out.
    pub fn place_hand_markers<M: CoordinateMapper + ?Sized>(
        &self,
        body: &Body,
        mapper: &M,
    ) -> Vec<HandMarker> {
        [
            (JointType::HandLeft, body.hand_left),
            (JointType::HandRight, body.hand_right),
        ]
        .into_iter()
        .filter_map(|(joint, state)| {
            let color = state.marker_color()?;
            let center = self.project_joint(body, joint, mapper).ok()?;
            Some(HandMarker {
                tracking_id: body.tracking_id,
                joint,
                center,
                radius: self.marker_radius,
                color,
            })
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{CameraSpacePoint, Joint};

    fn identity(p: CameraSpacePoint) -> ColorSpacePoint {
        ColorSpacePoint { x: p.x, y: p.y }
    }

    #[test]
    fn test_label_offsets() {
        let layout = LabelLayout::default();
        let body = Body::with_head(
            9,
            CameraSpacePoint {
                x: 400.0,
                y: 600.0,
                z: 1.0,
            },
        );
        let placed = layout.place_label(&body, "hi", &identity).unwrap();
        assert_eq!(placed.anchor, (200.0, 300.0));
        assert_eq!(
            placed.bubble,
            Rect {
                x: 260.0,
                y: 200.0,
                width: 300.0,
                height: 80.0
            }
        );
        assert_eq!(placed.text_origin, (300.0, 220.0));
        assert_eq!(placed.text, "hi");
    }

    #[test]
    fn test_non_finite_projection_skipped() {
        let layout = LabelLayout::default();
        let body = Body::with_head(1, CameraSpacePoint::default());
        let mapper = |_p: CameraSpacePoint| ColorSpacePoint {
            x: f32::INFINITY,
            y: 0.0,
        };
        assert_eq!(
            layout.place_label(&body, "x", &mapper),
            Err(OverlayError::ProjectionFailure)
        );

        // A non-finite y is rejected as well
        let mapper = |_p: CameraSpacePoint| ColorSpacePoint { x: 0.0, y: f32::NAN };
        assert_eq!(
            layout.place_label(&body, "x", &mapper),
            Err(OverlayError::ProjectionFailure)
        );
    }

    #[test]
    fn test_inferred_head_not_placed() {
        let layout = LabelLayout::default();
        let mut body = Body::with_head(1, CameraSpacePoint::default());
        body.joints.insert(
            JointType::Head,
            Joint {
                position: CameraSpacePoint::default(),
                tracking_state: TrackingState::Inferred,
            },
        );
        assert_eq!(
            layout.place_label(&body, "x", &identity),
            Err(OverlayError::JointNotTracked)
        );
    }

    #[test]
    fn test_hand_markers() {
        let layout = LabelLayout::default();
        let mut body = Body::with_head(4, CameraSpacePoint::default());
        body.joints
            .insert(JointType::HandLeft, Joint::tracked(10.0, 20.0, 1.0));
        body.joints
            .insert(JointType::HandRight, Joint::tracked(30.0, 40.0, 1.0));
        body.hand_left = HandState::Closed;
        body.hand_right = HandState::Unknown;

        let markers = layout.place_hand_markers(&body, &identity);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].joint, JointType::HandLeft);
        assert_eq!(markers[0].center, (5.0, 10.0));
        assert_eq!(markers[0].color, [255, 0, 0]);
    }
}
