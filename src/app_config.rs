use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and applying configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language name (e.g. "English")
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language name (e.g. "Persian")
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Completion endpoint config
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Chunking config
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Directory for reusable translation mapping artifacts
    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Root directory for per-session debug artifacts
    #[serde(default = "default_debug_dir")]
    pub debug_dir: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Completion endpoint configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Chat-completions endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum output tokens per completion
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Sampling temperature, kept low to favor determinism
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling top-p
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Additional attempts after a failed request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed delay between attempts in seconds
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            model: default_model(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Chunking configuration for large files
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChunkingConfig {
    /// Whether to split large files into chunks
    #[serde(default = "default_chunking_enabled")]
    pub enabled: bool,

    /// Maximum subtitle entries per chunk
    #[serde(default = "default_max_entries_per_chunk")]
    pub max_entries_per_chunk: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            enabled: default_chunking_enabled(),
            max_entries_per_chunk: default_max_entries_per_chunk(),
        }
    }
}

/// Log level setting
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl LogLevel {
    /// Convert to a log crate level filter
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
            provider: ProviderConfig::default(),
            chunking: ChunkingConfig::default(),
            log_dir: default_log_dir(),
            debug_dir: default_debug_dir(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() {
            return Err(anyhow!("Source language cannot be empty"));
        }

        if self.target_language.trim().is_empty() {
            return Err(anyhow!("Target language cannot be empty"));
        }

        if self.provider.endpoint.trim().is_empty() {
            return Err(anyhow!("Endpoint cannot be empty"));
        }

        Url::parse(&self.provider.endpoint)
            .with_context(|| format!("Invalid endpoint URL: {}", self.provider.endpoint))?;

        if self.provider.max_output_tokens == 0 {
            return Err(anyhow!("Max output tokens must be at least 1"));
        }

        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(anyhow!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.provider.temperature
            ));
        }

        if !(0.0..=1.0).contains(&self.provider.top_p) {
            return Err(anyhow!(
                "Top-p must be between 0.0 and 1.0, got {}",
                self.provider.top_p
            ));
        }

        if self.chunking.max_entries_per_chunk == 0 {
            return Err(anyhow!("Chunk size must be at least 1 entry"));
        }

        Ok(())
    }
}

fn default_source_language() -> String {
    "English".to_string()
}

fn default_target_language() -> String {
    "Persian".to_string()
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_output_tokens() -> u32 {
    24576
}

fn default_temperature() -> f32 {
    0.1
}

fn default_top_p() -> f32 {
    0.95
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    5
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_chunking_enabled() -> bool {
    true
}

fn default_max_entries_per_chunk() -> usize {
    50
}

fn default_log_dir() -> String {
    "translation_logs".to_string()
}

fn default_debug_dir() -> String {
    "debug_logs".to_string()
}
