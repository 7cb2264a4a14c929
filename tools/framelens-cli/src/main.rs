//! FrameLens CLI — apply the video analysis modes offline.
//!
//! Usage:
//!   framelens process <INPUT> -o <OUTPUT> --mode <MODE>   Transform one image
//!   framelens simulate [OPTIONS]                          Run the synthetic source
//!   framelens modes                                       List available modes

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use framelens_pipeline::VideoMode;

mod commands;

#[derive(Parser)]
#[command(
    name = "framelens",
    about = "Real-time video analysis transforms, offline",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply one video mode to an image file
    Process {
        /// Input image path
        input: PathBuf,

        /// Output image path
        #[arg(short, long)]
        output: PathBuf,

        /// Video mode to apply
        #[arg(long, default_value = "canny")]
        mode: String,

        /// Gaussian kernel size
        #[arg(long, default_value = "7")]
        gauss: i32,

        /// First canny threshold
        #[arg(long, default_value = "20")]
        thresh1: i32,

        /// Second canny threshold
        #[arg(long, default_value = "25")]
        thresh2: i32,

        /// Lower binary threshold
        #[arg(long, default_value = "180")]
        binary_min: i32,

        /// Binary paint value
        #[arg(long, default_value = "255")]
        binary_max: i32,
    },

    /// Run synthetic frames through the pipeline and report stats
    Simulate {
        /// Number of frames to generate
        #[arg(short, long, default_value = "90")]
        frames: u64,

        /// Video mode to apply
        #[arg(long, default_value = "canny")]
        mode: String,

        /// Frame width
        #[arg(long, default_value = "320")]
        width: usize,

        /// Frame height
        #[arg(long, default_value = "240")]
        height: usize,

        /// Enable the motion-trail accumulation buffer
        #[arg(long)]
        accumulate: bool,

        /// Write the last rendered frame to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the available video modes
    Modes,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    framelens_common::logging::init_logging(&framelens_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Process {
            input,
            output,
            mode,
            gauss,
            thresh1,
            thresh2,
            binary_min,
            binary_max,
        } => commands::process::run(
            input, output, &mode, gauss, thresh1, thresh2, binary_min, binary_max,
        ),
        Commands::Simulate {
            frames,
            mode,
            width,
            height,
            accumulate,
            output,
        } => commands::simulate::run(frames, &mode, width, height, accumulate, output),
        Commands::Modes => {
            for mode in VideoMode::ALL {
                println!("{mode}");
            }
            Ok(())
        }
    }
}
