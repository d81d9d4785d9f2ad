// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::app_config::{Config, LogLevel};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod providers;
mod session;
mod subtitle_processor;
mod translation;

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// aisubtrans - AI-powered SRT subtitle translator
///
/// Batch-translates SRT subtitle files through an OpenAI-compatible
/// chat-completions endpoint, preserving entry count and timing exactly.
#[derive(Parser, Debug)]
#[command(name = "aisubtrans")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered SRT subtitle translation tool")]
#[command(long_about = "aisubtrans translates SRT subtitle files using an AI completion endpoint.

EXAMPLES:
    aisubtrans input.srt                        # Translate using default config
    aisubtrans -o out.srt input.srt             # Explicit output path
    aisubtrans -s English -t Spanish input.srt  # Override languages
    aisubtrans --chunk-size 30 input.srt        # Smaller chunks
    aisubtrans --log-level debug input.srt      # Verbose logging

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, built-in defaults are used.")]
struct CommandLineOptions {
    /// Input SRT file to translate
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output SRT file path (defaults to "<input stem>.<target>.srt")
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Source language name (e.g. 'English')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language name (e.g. 'Persian')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Maximum subtitle entries per chunk
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
//
// Filters against the global max level so the level can be raised after the
// config is loaded.
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} [{}] {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    let cli = CommandLineOptions::parse();

    let mut config = if file_utils::FileManager::file_exists(&cli.config_path) {
        Config::from_file(&cli.config_path)
            .with_context(|| format!("Failed to load config from {}", cli.config_path))?
    } else {
        warn!("Config file {} not found, using defaults", cli.config_path);
        Config::default()
    };

    // Apply command line overrides
    if let Some(source_language) = cli.source_language {
        config.source_language = source_language;
    }
    if let Some(target_language) = cli.target_language {
        config.target_language = target_language;
    }
    if let Some(chunk_size) = cli.chunk_size {
        config.chunking.max_entries_per_chunk = chunk_size;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }

    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::new(config)?;
    controller.run(&cli.input_path, cli.output.as_deref()).await
}
