// SPDX-License-Identifier: GPL-3.0-only

//! Per-tick stream processing
//!
//! The viewer owns one BGRA surface per image stream, allocated once and
//! overwritten in place. Each tick polls every stream once; a stream with no
//! frame ready, or a frame that does not fit its surface, is skipped for that
//! tick and the surface keeps its previous contents.

mod frame_loop;

pub use frame_loop::{LoopAction, TickLoop};

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::colorize::{colorize_depth, colorize_infrared, convert_color_frame};
use crate::config::Config;
use crate::errors::{AppResult, SourceError};
use crate::overlay::{BodyOverlay, OverlayFrame};
use crate::source::{
    ColorFrame, CoordinateMapper, DepthFrame, FrameDescription, FrameSource, InfraredFrame,
};

/// Stream currently shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VisualMode {
    /// Color image with body overlay
    #[default]
    Camera,
    Depth,
    Infrared,
}

impl VisualMode {
    pub const ALL: [VisualMode; 3] = [VisualMode::Camera, VisualMode::Depth, VisualMode::Infrared];

    pub fn display_name(&self) -> &'static str {
        match self {
            VisualMode::Camera => "Camera",
            VisualMode::Depth => "Depth",
            VisualMode::Infrared => "Infrared",
        }
    }

    /// Next mode in display order
    pub fn next(&self) -> Self {
        match self {
            VisualMode::Camera => VisualMode::Depth,
            VisualMode::Depth => VisualMode::Infrared,
            VisualMode::Infrared => VisualMode::Camera,
        }
    }
}

/// Sensor stream kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Color,
    Depth,
    Infrared,
    Body,
}

impl StreamKind {
    pub fn name(&self) -> &'static str {
        match self {
            StreamKind::Color => "color",
            StreamKind::Depth => "depth",
            StreamKind::Infrared => "infrared",
            StreamKind::Body => "body",
        }
    }
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A BGRA display buffer for one stream
#[derive(Debug, Clone)]
pub struct Surface {
    description: FrameDescription,
    pixels: Vec<u8>,
    /// Number of frames written so far
    generation: u64,
}

impl Surface {
    pub fn new(description: FrameDescription) -> Self {
        Self {
            description,
            pixels: vec![0; description.bgra_len()],
            generation: 0,
        }
    }

    pub fn description(&self) -> FrameDescription {
        self.description
    }

    /// BGRA bytes, stride = width * 4
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn accept(&self, stream: StreamKind, description: FrameDescription) -> Result<(), SourceError> {
        if description != self.description {
            return Err(SourceError::DescriptionMismatch {
                stream: stream.name(),
                expected: (self.description.width, self.description.height),
                actual: (description.width, description.height),
            });
        }
        Ok(())
    }
}

/// What one tick changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub color: bool,
    pub depth: bool,
    pub infrared: bool,
    pub bodies: bool,
    /// Streams that delivered a frame which was rejected
    pub rejected: Vec<StreamKind>,
}

impl TickReport {
    pub fn updated(&self) -> Vec<StreamKind> {
        [
            (StreamKind::Color, self.color),
            (StreamKind::Depth, self.depth),
            (StreamKind::Infrared, self.infrared),
            (StreamKind::Body, self.bodies),
        ]
        .into_iter()
        .filter_map(|(kind, updated)| updated.then_some(kind))
        .collect()
    }
}

pub struct Viewer<R = StdRng> {
    color: Surface,
    depth: Surface,
    infrared: Surface,
    overlay: BodyOverlay<R>,
    overlay_frame: OverlayFrame,
    mode: VisualMode,
    reliable_range_override: Option<(u16, u16)>,
}

impl Viewer<StdRng> {
    /// Create a viewer for the given color and depth/infrared resolutions
    pub fn new(
        color: FrameDescription,
        depth: FrameDescription,
        config: &Config,
    ) -> AppResult<Self> {
        config.validate()?;
        let overlay = BodyOverlay::new(config.label_pool.clone(), config.layout)?;
        Ok(Self::with_overlay(color, depth, overlay, config))
    }
}

impl<R: Rng> Viewer<R> {
    /// Create a viewer around an existing overlay (custom label generator)
    pub fn with_overlay(
        color: FrameDescription,
        depth: FrameDescription,
        overlay: BodyOverlay<R>,
        config: &Config,
    ) -> Self {
        Self {
            color: Surface::new(color),
            depth: Surface::new(depth),
            infrared: Surface::new(depth),
            overlay,
            overlay_frame: OverlayFrame::default(),
            mode: config.visual_mode,
            reliable_range_override: config.reliable_range_override,
        }
    }

    /// Poll every stream once and process what arrived
    pub fn tick<S, M>(&mut self, source: &mut S, mapper: &M) -> TickReport
    where
        S: FrameSource + ?Sized,
        M: CoordinateMapper + ?Sized,
    {
        let mut report = TickReport::default();

        let color = source.poll_color().map(|frame| self.process_color(&frame));
        report.color = settle(StreamKind::Color, color, &mut report.rejected);

        let depth = source.poll_depth().map(|frame| self.process_depth(&frame));
        report.depth = settle(StreamKind::Depth, depth, &mut report.rejected);

        let infrared = source
            .poll_infrared()
            .map(|frame| self.process_infrared(&frame));
        report.infrared = settle(StreamKind::Infrared, infrared, &mut report.rejected);

        match source.poll_bodies() {
            Some(bodies) => {
                self.overlay_frame = self.overlay.update(&bodies, mapper);
                report.bodies = true;
            }
            None => trace!(
                stream = %StreamKind::Body,
                reason = %SourceError::UnavailableFrame,
                "Skipping stream"
            ),
        }

        report
    }

    fn process_color(&mut self, frame: &ColorFrame) -> AppResult<()> {
        self.color.accept(StreamKind::Color, frame.description)?;
        convert_color_frame(frame, &mut self.color.pixels)?;
        self.color.generation += 1;
        Ok(())
    }

    fn process_depth(&mut self, frame: &DepthFrame) -> AppResult<()> {
        self.depth.accept(StreamKind::Depth, frame.description)?;
        let (min, max) = self
            .reliable_range_override
            .unwrap_or((frame.min_reliable, frame.max_reliable));
        colorize_depth(&frame.data, min, max, &mut self.depth.pixels)?;
        self.depth.generation += 1;
        Ok(())
    }

    fn process_infrared(&mut self, frame: &InfraredFrame) -> AppResult<()> {
        self.infrared
            .accept(StreamKind::Infrared, frame.description)?;
        colorize_infrared(&frame.data, &mut self.infrared.pixels)?;
        self.infrared.generation += 1;
        Ok(())
    }

    pub fn mode(&self) -> VisualMode {
        self.mode
    }

    /// Switch the visible stream; all streams keep being processed
    pub fn set_mode(&mut self, mode: VisualMode) {
        self.mode = mode;
    }

    pub fn cycle_mode(&mut self) -> VisualMode {
        self.mode = self.mode.next();
        self.mode
    }

    pub fn surface(&self, mode: VisualMode) -> &Surface {
        match mode {
            VisualMode::Camera => &self.color,
            VisualMode::Depth => &self.depth,
            VisualMode::Infrared => &self.infrared,
        }
    }

    pub fn visible_surface(&self) -> &Surface {
        self.surface(self.mode)
    }

    /// Overlay from the latest body frame
    pub fn overlay(&self) -> &OverlayFrame {
        &self.overlay_frame
    }

    pub fn body_overlay(&self) -> &BodyOverlay<R> {
        &self.overlay
    }
}

/// Log the outcome of one stream and report whether its surface changed
fn settle(
    stream: StreamKind,
    outcome: Option<AppResult<()>>,
    rejected: &mut Vec<StreamKind>,
) -> bool {
    match outcome {
        None => {
            trace!(stream = %stream, reason = %SourceError::UnavailableFrame, "Skipping stream");
            false
        }
        Some(Ok(())) => true,
        Some(Err(e)) => {
            warn!(stream = %stream, error = %e, "Dropping frame");
            rejected.push(stream);
            false
        }
    }
}
