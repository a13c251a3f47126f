//! Head-scroll demo binary: replays raw RGBA frames through the pipeline
//! and logs the scroll actions it would inject.

use anyhow::Result;
use clap::Parser;
use head_scroll::config::Config;
use head_scroll::detector::TierSelector;
use head_scroll::driver::{FrameDriver, ScrollExecutor};
use head_scroll::frame::{FrameSource, PixelBuffer};
use head_scroll::session::Status;
use head_scroll::settings::SettingsHandle;
use head_scroll::worker::DetectionWorker;
use log::{info, warn};
use std::fs::File;
use std::io::Read;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Raw RGBA frame file to replay (width * height * 4 bytes per frame)
    #[arg(short, long)]
    input: String,

    /// Frame width in pixels
    #[arg(long)]
    width: u32,

    /// Frame height in pixels
    #[arg(long)]
    height: u32,

    /// Movement threshold override (10-50)
    #[arg(short, long)]
    threshold: Option<i32>,

    /// Scroll speed override (20-150)
    #[arg(short, long)]
    speed: Option<i32>,

    /// Run heuristic scoring inline instead of on the worker thread
    #[arg(long)]
    no_offload: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

/// Frame source reading tightly packed RGBA frames from a file.
struct RawFileSource {
    file: File,
    width: u32,
    height: u32,
}

impl RawFileSource {
    fn open(path: &str, width: u32, height: u32) -> head_scroll::Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            file,
            width,
            height,
        })
    }
}

impl FrameSource for RawFileSource {
    fn next_frame(&mut self) -> head_scroll::Result<Option<PixelBuffer>> {
        let frame_len = self.width as usize * self.height as usize * 4;
        let mut data = vec![0u8; frame_len];
        let mut read = 0;
        while read < frame_len {
            match self.file.read(&mut data[read..]) {
                Ok(0) => {
                    if read > 0 {
                        warn!("trailing partial frame ({read} of {frame_len} bytes), ignoring");
                    }
                    return Ok(None);
                }
                Ok(n) => read += n,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(Some(PixelBuffer::new(self.width, self.height, data)?))
    }
}

/// Scroll executor that only logs the deltas it receives.
struct LogScrollExecutor;

impl ScrollExecutor for LogScrollExecutor {
    fn scroll_by(&mut self, delta: i32) -> head_scroll::Result<()> {
        println!("SCROLL {delta:+} px");
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {e}. Using defaults.");
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(threshold) = args.threshold {
        config.tracking.movement_threshold = threshold;
    }
    if let Some(speed) = args.speed {
        config.tracking.scroll_speed = speed;
    }
    if args.no_offload {
        config.detector.offload = false;
    }
    config.validate()?;

    let source = RawFileSource::open(&args.input, args.width, args.height)?;

    let worker = if config.detector.offload {
        match DetectionWorker::spawn() {
            Ok(worker) => Some(worker),
            Err(e) => {
                warn!("Worker offload unavailable, falling back to inline scoring: {e}");
                None
            }
        }
    } else {
        None
    };

    let driver_config = config.driver_config();
    let selector = TierSelector::new(None, worker, driver_config.analysis_scale);
    let settings = SettingsHandle::new(config.settings());

    let mut driver = FrameDriver::new(
        Box::new(source),
        Box::new(LogScrollExecutor),
        selector,
        settings,
        Box::new(|status: &Status| info!("status: {status:?}")),
        driver_config,
    );

    info!(
        "Replaying {} at {}x{}",
        args.input, args.width, args.height
    );
    driver.run()?;

    Ok(())
}
