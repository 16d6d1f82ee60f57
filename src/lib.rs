// SPDX-License-Identifier: GPL-3.0-only

//! Sensor View - depth camera stream visualization
//!
//! Turns raw depth camera streams into display-ready BGRA buffers and body
//! overlay labels.
//!
//! # Architecture
//!
//! - [`colorize`]: depth, infrared and color sample conversion
//! - [`overlay`]: label binding per tracked body and label layout
//! - [`source`]: frame source and coordinate mapper abstractions
//! - [`viewer`]: per-tick processing of all streams
//! - [`config`]: user configuration
//! - [`terminal`]: terminal preview surface
//!
//! # Example
//!
//! ```ignore
//! let mut pixels = vec![0u8; depth.len() * 4];
//! sensor_view::colorize::colorize_depth(&depth, 500, 4500, &mut pixels)?;
//! ```

pub mod colorize;
pub mod config;
pub mod constants;
pub mod errors;
pub mod overlay;
pub mod source;
pub mod terminal;
pub mod viewer;

// Re-export commonly used types
pub use config::Config;
pub use errors::{AppError, AppResult, ColorizeError};
pub use viewer::{Viewer, VisualMode};
