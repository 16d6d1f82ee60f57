// SPDX-License-Identifier: GPL-3.0-only

//! Terminal-based stream viewer
//!
//! Renders the visible stream to the terminal using Unicode half-block
//! characters for improved vertical resolution. Body labels are drawn on top
//! of the camera view.

use crate::config::Config;
use crate::constants::{COLOR_HEIGHT, COLOR_WIDTH, DEPTH_HEIGHT, DEPTH_WIDTH};
use crate::overlay::LabelPlacement;
use crate::source::{ColorImageFormat, FrameDescription, PinholeMapper, SyntheticSource};
use crate::viewer::{Surface, Viewer, VisualMode};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};
use std::io::{self, stdout};
use std::time::Duration;
use tracing::{info, warn};

/// Preview resolution for the terminal; full sensor resolution is wasted here
const PREVIEW_COLOR: FrameDescription = FrameDescription::new(COLOR_WIDTH / 4, COLOR_HEIGHT / 4);
const PREVIEW_DEPTH: FrameDescription = FrameDescription::new(DEPTH_WIDTH, DEPTH_HEIGHT);

/// Run the terminal viewer against the synthetic sensor
pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    // Build everything fallible before touching the terminal
    let viewer = Viewer::new(PREVIEW_COLOR, PREVIEW_DEPTH, config)?;

    let guard = RawModeGuard::enter()?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, viewer, config);

    drop(guard);
    terminal.show_cursor()?;

    result
}

/// Raw mode and the alternate screen, restored on drop
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "Failed to leave raw mode");
        }
        if let Err(e) = execute!(stdout(), LeaveAlternateScreen) {
            warn!(error = %e, "Failed to leave alternate screen");
        }
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut viewer: Viewer,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = SyntheticSource::new(PREVIEW_COLOR, PREVIEW_DEPTH)
        .with_color_format(ColorImageFormat::Yuy2);
    // The mapper works in full color resolution; scale it to the preview
    let full = PinholeMapper::default();
    let scale = PREVIEW_COLOR.width as f32 / COLOR_WIDTH as f32;
    let mapper = PinholeMapper {
        fx: full.fx * scale,
        fy: full.fy * scale,
        cx: full.cx * scale,
        cy: full.cy * scale,
    };
    let label_space = (
        PREVIEW_COLOR.width as f32 * config.layout.display_scale,
        PREVIEW_COLOR.height as f32 * config.layout.display_scale,
    );

    info!(mode = viewer.mode().display_name(), "Terminal viewer started");

    let mut show_help = false;
    let poll_timeout = Duration::from_millis(config.frame_interval_ms.max(1));

    loop {
        viewer.tick(&mut source, &mapper);
        source.advance();

        let status_message = if show_help {
            build_help_message()
        } else {
            build_status_message(viewer.mode())
        };

        terminal.draw(|f| {
            let area = f.area();

            // Reserve bottom line for status
            let frame_area = Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: area.height.saturating_sub(1),
            };

            let labels: &[LabelPlacement] = if viewer.mode() == VisualMode::Camera {
                &viewer.overlay().labels
            } else {
                &[]
            };
            let widget = FrameWidget {
                surface: viewer.visible_surface(),
                labels,
                label_space,
            };
            f.render_widget(widget, frame_area);

            let status_area = Rect {
                x: area.x,
                y: area.height.saturating_sub(1),
                width: area.width,
                height: 1,
            };
            f.render_widget(
                StatusBar {
                    message: &status_message,
                },
                status_area,
            );
        })?;

        if event::poll(poll_timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Char('q') => break,
                KeyCode::Char('c') => viewer.set_mode(VisualMode::Camera),
                KeyCode::Char('d') => viewer.set_mode(VisualMode::Depth),
                KeyCode::Char('i') => viewer.set_mode(VisualMode::Infrared),
                KeyCode::Tab => {
                    viewer.cycle_mode();
                }
                KeyCode::Char('h') => show_help = !show_help,
                _ => {}
            }
        }
    }

    info!("Terminal viewer exiting");
    Ok(())
}

fn build_status_message(mode: VisualMode) -> String {
    format!(
        "[{}] 'c' camera | 'd' depth | 'i' infrared | 'h' help | 'q' quit",
        mode.display_name()
    )
}

fn build_help_message() -> String {
    String::from("c/d/i: Switch stream | Tab: Next stream | h: Toggle help | q/Ctrl+C: Quit")
}

/// Widget that renders a BGRA surface using half-block characters
struct FrameWidget<'a> {
    surface: &'a Surface,
    labels: &'a [LabelPlacement],
    /// Size of the space label coordinates live in
    label_space: (f32, f32),
}

impl Widget for FrameWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let description = self.surface.description();
        if self.surface.generation() == 0 || description.pixel_count() == 0 {
            let msg = "Waiting for sensor...";
            let x = area.x + (area.width.saturating_sub(msg.len() as u16)) / 2;
            let y = area.y + area.height / 2;
            if y < area.y + area.height && x < area.x + area.width {
                buf.set_string(x, y, msg, Style::default());
            }
            return;
        }

        // Each terminal cell displays 2 vertical pixels using half-block characters
        let frame_aspect = description.width as f64 / description.height as f64;
        let term_width = area.width as f64;
        let term_height = (area.height * 2) as f64;

        let (display_width, display_height) = if term_width / term_height > frame_aspect {
            let h = term_height;
            let w = h * frame_aspect;
            (w as u16, (h / 2.0) as u16)
        } else {
            let w = term_width;
            let h = w / frame_aspect;
            (w as u16, (h / 2.0) as u16)
        };
        if display_width == 0 || display_height == 0 {
            return;
        }

        let x_offset = area.x + (area.width.saturating_sub(display_width)) / 2;
        let y_offset = area.y + (area.height.saturating_sub(display_height)) / 2;

        let x_scale = description.width as f64 / display_width as f64;
        let y_scale = description.height as f64 / (display_height * 2) as f64;

        for ty in 0..display_height {
            for tx in 0..display_width {
                let term_x = x_offset + tx;
                let term_y = y_offset + ty;

                let src_x = (tx as f64 * x_scale) as u32;
                let src_y_top = (ty as f64 * 2.0 * y_scale) as u32;
                let src_y_bottom = ((ty as f64 * 2.0 + 1.0) * y_scale) as u32;

                let top_color = sample_pixel(self.surface, src_x, src_y_top);
                let bottom_color = sample_pixel(self.surface, src_x, src_y_bottom);

                if let Some(cell) = buf.cell_mut((term_x, term_y)) {
                    cell.set_char('▀');
                    cell.set_fg(top_color);
                    cell.set_bg(bottom_color);
                }
            }
        }

        let style = Style::default().fg(Color::Black).bg(Color::Yellow);
        for label in self.labels {
            let fx = label.text_origin.0 / self.label_space.0;
            let fy = label.text_origin.1 / self.label_space.1;
            if !(0.0..1.0).contains(&fx) || !(0.0..1.0).contains(&fy) {
                continue;
            }
            let x = x_offset + (fx * display_width as f32) as u16;
            let y = y_offset + (fy * display_height as f32) as u16;
            let room = (area.x + area.width).saturating_sub(x) as usize;
            let text: String = label.text.chars().take(room).collect();
            buf.set_string(x, y, text, style);
        }
    }
}

fn sample_pixel(surface: &Surface, x: u32, y: u32) -> Color {
    let description = surface.description();
    let x = x.min(description.width - 1) as usize;
    let y = y.min(description.height - 1) as usize;
    let idx = y * description.stride() + x * 4;
    match surface.pixels().get(idx..idx + 3) {
        Some(&[b, g, r]) => Color::Rgb(r, g, b),
        _ => Color::Black,
    }
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(Color::DarkGray);
            }
        }

        let text: String = self.message.chars().take(area.width as usize).collect();
        buf.set_string(
            area.x,
            area.y,
            text,
            Style::default().fg(Color::White).bg(Color::DarkGray),
        );
    }
}
