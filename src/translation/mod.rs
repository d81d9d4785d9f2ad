/*!
 * Chunked translation pipeline.
 *
 * This module contains the translation request builder, the lenient response
 * extractor, the exact key-set validator, and the sequential pipeline that
 * drives them chunk by chunk:
 * - `translation::request`: Per-chunk context, mapping and prompt construction
 * - `translation::extractor`: JSON-object recovery from raw model output
 * - `translation::validation`: Expected/received key-set reconciliation
 * - `translation::pipeline`: Chunk iteration, aggregation and timing merge
 */

use std::collections::HashMap;

pub mod extractor;
pub mod pipeline;
pub mod request;
pub mod validation;

pub use pipeline::{merge_translations, ProgressEvent, TranslationPipeline};
pub use validation::ValidationReport;

/// Mapping from subtitle index to text, either as sent or as translated
pub type TranslationMapping = HashMap<String, String>;
