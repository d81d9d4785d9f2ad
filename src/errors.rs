/*!
 * Error types for the aisubtrans application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to the completion endpoint
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Response carried no usable completion text
    #[error("API response contained no completion content")]
    EmptyResponse,
}

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// No subtitle entries could be recovered from the source
    #[error("No subtitle entries found in source")]
    NoEntries,

    /// Chunk limit must be a positive number of entries
    #[error("Chunk size must be at least 1 entry")]
    InvalidChunkSize,
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error with subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// The model response could not be decoded as a JSON object
    #[error("Chunk {chunk}: could not extract a JSON object from the model response")]
    Extraction {
        /// 1-based chunk number
        chunk: usize
    },

    /// The received mapping does not match the requested entry set
    #[error("Chunk {chunk}: translation incomplete (missing indices: {missing:?}, unexpected indices: {extra:?})")]
    Validation {
        /// 1-based chunk number
        chunk: usize,
        /// Requested indices absent from the response
        missing: Vec<String>,
        /// Response indices that were never requested
        extra: Vec<String>,
    },

    /// A pipeline invariant was violated; this indicates a bug, not user error
    #[error("Internal consistency fault: {0}")]
    InternalConsistency(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
