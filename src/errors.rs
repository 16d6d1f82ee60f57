// SPDX-License-Identifier: GPL-3.0-only

//! Error types for stream conversion and overlays

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Pixel conversion errors
    Colorize(ColorizeError),
    /// Body overlay errors
    Overlay(OverlayError),
    /// Frame source errors
    Source(SourceError),
    /// Configuration errors
    Config(String),
    /// Filesystem errors
    Io(String),
    /// Generic error with message
    Other(String),
}

/// Pixel conversion errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorizeError {
    /// Pixel buffer length does not fit the input samples
    SizeMismatch { expected: usize, actual: usize },
    /// Packed color data is not a whole number of macropixels
    UnalignedColor { len: usize },
}

/// Body overlay errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayError {
    /// No labels to pick from
    EmptyLabelPool,
    /// Projection produced a non-finite coordinate
    ProjectionFailure,
    /// The anchor joint is missing or not tracked
    JointNotTracked,
}

/// Frame source errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// No frame was ready on this tick
    UnavailableFrame,
    /// Frame dimensions do not match the display surface
    DescriptionMismatch {
        stream: &'static str,
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Colorize(e) => write!(f, "Conversion error: {}", e),
            AppError::Overlay(e) => write!(f, "Overlay error: {}", e),
            AppError::Source(e) => write!(f, "Source error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Io(msg) => write!(f, "I/O error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for ColorizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorizeError::SizeMismatch { expected, actual } => write!(
                f,
                "Pixel buffer size mismatch: expected {} bytes, got {}",
                expected, actual
            ),
            ColorizeError::UnalignedColor { len } => {
                write!(f, "Color data length {} is not a multiple of 4", len)
            }
        }
    }
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayError::EmptyLabelPool => write!(f, "Label pool is empty"),
            OverlayError::ProjectionFailure => write!(f, "Projected point is not finite"),
            OverlayError::JointNotTracked => write!(f, "Anchor joint is not tracked"),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::UnavailableFrame => write!(f, "No frame available"),
            SourceError::DescriptionMismatch {
                stream,
                expected,
                actual,
            } => write!(
                f,
                "{} frame is {}x{}, surface expects {}x{}",
                stream, actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for ColorizeError {}
impl std::error::Error for OverlayError {}
impl std::error::Error for SourceError {}

impl From<ColorizeError> for AppError {
    fn from(err: ColorizeError) -> Self {
        AppError::Colorize(err)
    }
}

impl From<OverlayError> for AppError {
    fn from(err: OverlayError) -> Self {
        AppError::Overlay(err)
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        AppError::Source(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
