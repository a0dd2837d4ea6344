use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "rt")]
#[command(about = "Render an XML scene with a Whitted-style ray tracer")]
pub struct Args {
    /// Scene file to render; renders a built-in demo scene when omitted
    pub scene: Option<PathBuf>,

    /// Output PNG path (overrides the scene's output setting)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Image width in pixels (overrides the scene camera)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Image height in pixels (overrides the scene camera)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Worker threads for bucket rendering (defaults to all cores)
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Render pixels in order on the calling thread
    #[arg(long)]
    pub single_threaded: bool,

    /// Bucket edge length in pixels
    #[arg(long, default_value_t = rt_renderer::DEFAULT_BUCKET_SIZE)]
    pub bucket_size: u32,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}
