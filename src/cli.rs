// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! This module provides command-line functionality for:
//! - Rendering raw frame dumps to PNG
//! - Running the viewer against the synthetic sensor

use chrono::Local;
use clap::ValueEnum;
use sensor_view::colorize::{bgra_to_rgba, colorize_depth, colorize_infrared, convert_color_frame};
use sensor_view::constants::{
    COLOR_HEIGHT, COLOR_WIDTH, DEPTH_HEIGHT, DEPTH_MAX_RELIABLE_MM, DEPTH_MIN_RELIABLE_MM,
    DEPTH_WIDTH,
};
use sensor_view::source::{
    ColorFrame, ColorImageFormat, FrameDescription, PinholeMapper, SyntheticSource,
};
use sensor_view::viewer::{LoopAction, TickLoop};
use sensor_view::{Config, Viewer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StreamArg {
    Color,
    Depth,
    Infrared,
}

impl StreamArg {
    fn name(&self) -> &'static str {
        match self {
            StreamArg::Color => "color",
            StreamArg::Depth => "depth",
            StreamArg::Infrared => "infrared",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorFormatArg {
    Bgra,
    Yuy2,
}

impl From<ColorFormatArg> for ColorImageFormat {
    fn from(arg: ColorFormatArg) -> Self {
        match arg {
            ColorFormatArg::Bgra => ColorImageFormat::Bgra,
            ColorFormatArg::Yuy2 => ColorImageFormat::Yuy2,
        }
    }
}

pub struct RenderRequest {
    pub stream: StreamArg,
    pub input: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Reliable depth range from the command line (min, max)
    pub range: (Option<u16>, Option<u16>),
    pub format: ColorFormatArg,
    pub output: Option<PathBuf>,
}

/// Convert a raw frame dump to a PNG file
pub fn render(config: &Config, request: RenderRequest) -> Result<(), Box<dyn std::error::Error>> {
    let description = FrameDescription::new(request.width, request.height);
    let raw = std::fs::read(&request.input)?;
    let mut pixels = vec![0u8; description.bgra_len()];

    match request.stream {
        StreamArg::Depth | StreamArg::Infrared => {
            let samples = read_samples(&raw, description)?;
            if request.stream == StreamArg::Depth {
                let (min, max) = render_range(config, request.range);
                if min > max {
                    return Err(format!("Minimum depth {} is above maximum {}", min, max).into());
                }
                colorize_depth(&samples, min, max, &mut pixels)?;
            } else {
                colorize_infrared(&samples, &mut pixels)?;
            }
        }
        StreamArg::Color => {
            let frame = ColorFrame {
                description,
                format: request.format.into(),
                data: raw,
            };
            let expected = description.pixel_count() * frame.format.bytes_per_pixel();
            if frame.data.len() != expected {
                return Err(format!(
                    "Expected {} bytes of color data for {}, got {}",
                    expected,
                    description,
                    frame.data.len()
                )
                .into());
            }
            convert_color_frame(&frame, &mut pixels)?;
        }
    }

    let img: image::RgbaImage =
        image::ImageBuffer::from_raw(request.width, request.height, bgra_to_rgba(&pixels))
            .ok_or("Failed to create image")?;

    let filepath = match request.output {
        Some(path) => path,
        None => default_output_path(request.stream)?,
    };
    if let Some(parent) = filepath.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    img.save(&filepath)?;
    info!(path = %filepath.display(), stream = request.stream.name(), "Frame rendered");
    println!("Saved: {}", filepath.display());

    Ok(())
}

/// Run the viewer against the synthetic sensor and print what each tick did
pub fn simulate(config: &Config, ticks: u64) -> Result<(), Box<dyn std::error::Error>> {
    let color = FrameDescription::new(COLOR_WIDTH, COLOR_HEIGHT);
    let depth = FrameDescription::new(DEPTH_WIDTH, DEPTH_HEIGHT);
    let mut viewer = Viewer::new(color, depth, config)?;
    // Color runs at half the depth rate
    let mut source = SyntheticSource::new(color, depth).with_color_every(2);
    let mapper = PinholeMapper::default();

    let interval = Duration::from_millis(config.frame_interval_ms);
    let executed = TickLoop::new("simulate", interval)
        .with_max_ticks(ticks)
        .run(|tick| {
            let report = viewer.tick(&mut source, &mapper);
            source.advance();

            let updated: Vec<&str> = report.updated().iter().map(|s| s.name()).collect();
            println!("tick {:>4}: updated [{}]", tick, updated.join(", "));
            for label in &viewer.overlay().labels {
                println!(
                    "           body {:>4} at ({:>6.1}, {:>6.1}): {}",
                    label.tracking_id, label.anchor.0, label.anchor.1, label.text
                );
            }
            for hand in &viewer.overlay().hands {
                println!(
                    "           body {:>4} {:?} at ({:>6.1}, {:>6.1}) rgb {:?}",
                    hand.tracking_id, hand.joint, hand.center.0, hand.center.1, hand.color
                );
            }

            LoopAction::Continue
        });

    println!();
    println!("Ran {} ticks", executed);
    for mode in sensor_view::VisualMode::ALL {
        let surface = viewer.surface(mode);
        println!(
            "  {:<8} {} frames at {}",
            mode.display_name(),
            surface.generation(),
            surface.description()
        );
    }

    Ok(())
}

/// Reliable range for `render`: command-line flags, then the configured
/// override, then the sensor defaults
fn render_range(config: &Config, flags: (Option<u16>, Option<u16>)) -> (u16, u16) {
    match flags {
        (None, None) => config.reliable_range((DEPTH_MIN_RELIABLE_MM, DEPTH_MAX_RELIABLE_MM)),
        (min, max) => (
            min.unwrap_or(DEPTH_MIN_RELIABLE_MM),
            max.unwrap_or(DEPTH_MAX_RELIABLE_MM),
        ),
    }
}

/// Decode little-endian u16 samples, checking the dump fits the frame
fn read_samples(raw: &[u8], description: FrameDescription) -> Result<Vec<u16>, String> {
    let expected = description.pixel_count() * 2;
    if raw.len() != expected {
        return Err(format!(
            "Expected {} bytes of samples for {}, got {}",
            expected,
            description,
            raw.len()
        ));
    }
    Ok(raw
        .chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
        .collect())
}

fn default_output_path(stream: StreamArg) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dir = get_default_output_dir();
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    Ok(dir.join(format!("{}_{}.png", stream.name(), timestamp)))
}

fn get_default_output_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join("sensor-view")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_samples_little_endian() {
        let raw = [0x40, 0x1F, 0x00, 0x00];
        let samples = read_samples(&raw, FrameDescription::new(2, 1)).unwrap();
        assert_eq!(samples, vec![8000, 0]);
    }

    #[test]
    fn test_render_range_flags_beat_override() {
        let config = Config {
            reliable_range_override: Some((1000, 2000)),
            ..Default::default()
        };
        assert_eq!(render_range(&config, (None, None)), (1000, 2000));
        assert_eq!(render_range(&config, (Some(600), Some(3000))), (600, 3000));
        assert_eq!(render_range(&config, (None, Some(3000))), (500, 3000));
        assert_eq!(render_range(&Config::default(), (None, None)), (500, 4500));
    }

    #[test]
    fn test_read_samples_wrong_size() {
        assert!(read_samples(&[0u8; 3], FrameDescription::new(2, 1)).is_err());
    }
}
