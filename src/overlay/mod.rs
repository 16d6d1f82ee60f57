// SPDX-License-Identifier: GPL-3.0-only

//! Body tracking overlay
//!
//! Binds a label to each tracked identity and lays it out next to the
//! projected head joint.

mod labels;
mod placement;

pub use labels::LabelBinder;
pub use placement::{HandMarker, LabelLayout, LabelPlacement, Rect};

use rand::Rng;
use rand::rngs::StdRng;
use tracing::trace;

use crate::constants::BODY_COUNT;
use crate::errors::OverlayError;
use crate::source::{Body, CoordinateMapper};

/// Everything to draw on top of the color image for one body frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayFrame {
    pub labels: Vec<LabelPlacement>,
    pub hands: Vec<HandMarker>,
}

impl OverlayFrame {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.hands.is_empty()
    }
}

pub struct BodyOverlay<R = StdRng> {
    binder: LabelBinder<R>,
    layout: LabelLayout,
}

impl BodyOverlay<StdRng> {
    pub fn new(pool: Vec<String>, layout: LabelLayout) -> Result<Self, OverlayError> {
        Ok(Self {
            binder: LabelBinder::new(pool)?,
            layout,
        })
    }
}

impl<R: Rng> BodyOverlay<R> {
    pub fn with_binder(binder: LabelBinder<R>, layout: LabelLayout) -> Self {
        Self { binder, layout }
    }

    /// Process one body frame
    ///
    /// Bodies whose head cannot be projected are skipped; the others are
    /// still placed.
    pub fn update<M: CoordinateMapper + ?Sized>(
        &mut self,
        bodies: &[Body],
        mapper: &M,
    ) -> OverlayFrame {
        self.binder.refresh(bodies);

        let mut frame = OverlayFrame::default();
        for body in bodies.iter().take(BODY_COUNT).filter(|b| b.is_tracked) {
            let Some(text) = self.binder.label_for(body.tracking_id) else {
                continue;
            };
            match self.layout.place_label(body, text, mapper) {
                Ok(placement) => frame.labels.push(placement),
                Err(e) => {
                    trace!(tracking_id = body.tracking_id, error = %e, "Skipping label");
                }
            }
            frame
                .hands
                .extend(self.layout.place_hand_markers(body, mapper));
        }
        frame
    }

    pub fn binder(&self) -> &LabelBinder<R> {
        &self.binder
    }

    pub fn layout(&self) -> &LabelLayout {
        &self.layout
    }
}
