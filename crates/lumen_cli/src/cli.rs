use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_renderer::{EstimatorMode, RenderConfig};

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "Render a JSON scene with the Lumen path tracer")]
pub struct Args {
    /// Scene description (JSON)
    pub scene: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Image width in pixels (overrides the scene)
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels (overrides the scene)
    #[arg(long)]
    pub height: Option<u32>,

    /// Samples per pixel (overrides the scene)
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Worker threads, defaults to the available parallelism
    #[arg(long, short = 't')]
    pub threads: Option<usize>,

    /// Fixed seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum path depth (overrides the scene)
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Use the corrected (Russian-roulette weighted, cosine-sampled) estimator
    #[arg(long)]
    pub corrected: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Layer command line overrides on top of a base configuration.
    pub fn apply(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(samples) = self.samples {
            config.samples = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        config.threads = self.threads.or(config.threads);
        config.seed = self.seed.or(config.seed);
        if self.corrected {
            config.mode = EstimatorMode::Corrected;
        }
        config
    }
}
