// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

use cli::{ColorFormatArg, StreamArg};

#[derive(Parser)]
#[command(name = "sensor-view")]
#[command(about = "Depth camera stream visualization")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Config file (default: ~/.config/sensor-view/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview the synthetic sensor in the terminal
    View,

    /// Convert a raw frame dump to PNG
    Render {
        /// Stream the dump belongs to
        #[arg(short, long, value_enum)]
        stream: StreamArg,

        /// Raw frame file (little-endian u16 samples, or color bytes)
        #[arg(short, long)]
        input: PathBuf,

        /// Frame width in pixels
        #[arg(long)]
        width: u32,

        /// Frame height in pixels
        #[arg(long)]
        height: u32,

        /// Minimum reliable depth (depth only)
        #[arg(long)]
        min: Option<u16>,

        /// Maximum reliable depth (depth only)
        #[arg(long)]
        max: Option<u16>,

        /// Raw color layout (color only)
        #[arg(long, value_enum, default_value = "bgra")]
        format: ColorFormatArg,

        /// Output file path (default: ~/Pictures/sensor-view/<stream>_TIMESTAMP.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the viewer against the synthetic sensor and log each tick
    Simulate {
        /// Number of ticks to run
        #[arg(short, long, default_value = "90")]
        ticks: u64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=sensor_view=trace, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => sensor_view::Config::load(path)?,
        None => sensor_view::Config::load_or_default(),
    };

    match cli.command {
        Some(Commands::Render {
            stream,
            input,
            width,
            height,
            min,
            max,
            format,
            output,
        }) => cli::render(
            &config,
            cli::RenderRequest {
                stream,
                input,
                width,
                height,
                range: (min, max),
                format,
                output,
            },
        ),
        Some(Commands::Simulate { ticks }) => cli::simulate(&config, ticks),
        Some(Commands::View) | None => sensor_view::terminal::run(&config),
    }
}
