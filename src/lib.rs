/*!
 * # aisubtrans - AI-powered SRT subtitle translator
 *
 * A Rust library for batch-translating SRT subtitle files through an
 * OpenAI-compatible chat-completions endpoint while preserving exact record
 * cardinality and timing metadata.
 *
 * ## Features
 *
 * - Parse and serialize SRT subtitle files with timing passed through untouched
 * - Split large files into bounded, order-preserving chunks
 * - Per-chunk prompts carrying full narrative context and an exact-count contract
 * - Lenient JSON recovery from model responses (fencing, trailing prose)
 * - Strict key-set validation of every chunk; all-or-nothing job semantics
 * - Bounded retry with fixed delay on transport and HTTP failures
 * - Per-session debug artifacts and a reusable translation mapping log
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: SRT parsing, serialization and chunking
 * - `translation`: The chunked translation pipeline:
 *   - `translation::request`: Context, mapping and prompt construction
 *   - `translation::extractor`: JSON-object recovery from raw model output
 *   - `translation::validation`: Expected/received key-set reconciliation
 *   - `translation::pipeline`: Sequential chunk driver and timing merge
 * - `providers`: The chat-completions client and its test seam
 * - `session`: Per-run debug artifact logging
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod providers;
pub mod session;
pub mod subtitle_processor;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
pub use translation::{TranslationMapping, TranslationPipeline};
pub use errors::{AppError, ProviderError, SubtitleError, TranslationError};
