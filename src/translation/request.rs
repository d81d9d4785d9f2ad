use std::fmt::Write;

use serde_json::Value;

use crate::subtitle_processor::{parse_numeric_index, SubtitleEntry};
use super::TranslationMapping;

// @module: Translation request construction

/// Everything the pipeline sends for one chunk
#[derive(Debug, Clone)]
pub struct ChunkRequest {
    /// Newline-joined text of every entry, in order, for narrative grounding.
    /// Never itself translated or validated.
    pub context: String,

    /// Index to original text, one entry per record. Timing is deliberately
    /// absent; it must never be sent to or trusted from the model.
    pub mapping: TranslationMapping,

    /// Exact number of entries the response must contain
    pub entry_count: usize,
}

/// Build the context, request mapping and entry count for one chunk
pub fn build_chunk_request(chunk: &[SubtitleEntry]) -> ChunkRequest {
    let context = chunk
        .iter()
        .map(|entry| entry.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let mapping: TranslationMapping = chunk
        .iter()
        .map(|entry| (entry.index.clone(), entry.text.clone()))
        .collect();

    ChunkRequest {
        context,
        entry_count: chunk.len(),
        mapping,
    }
}

/// Render the request mapping as a JSON object with indices in numeric order
fn render_mapping(mapping: &TranslationMapping) -> String {
    let mut indices: Vec<&String> = mapping.keys().collect();
    indices.sort_by_key(|index| parse_numeric_index(index));

    let mut rendered = String::from("{");
    for (i, index) in indices.iter().enumerate() {
        if i > 0 {
            rendered.push(',');
        }
        let _ = write!(
            rendered,
            "\n  {}: {}",
            Value::String((*index).clone()),
            Value::String(mapping[*index].clone())
        );
    }
    rendered.push_str("\n}");
    rendered
}

/// Build the instruction message for one chunk
///
/// The exact-count requirement is the load-bearing contract the validator
/// later checks mechanically; the instruction text itself is a best-effort
/// nudge, not a guarantee.
pub fn build_prompt(source_language: &str, target_language: &str, request: &ChunkRequest) -> String {
    let mapping_json = render_mapping(&request.mapping);
    let count = request.entry_count;

    format!(
        "You are a professional subtitle translator specializing in {source_language} to {target_language} translation.\n\
         \n\
         CONTEXT - Full subtitle content for understanding the complete narrative:\n\
         {context}\n\
         \n\
         CRITICAL REQUIREMENTS:\n\
         1. YOU MUST RETURN EXACTLY {count} ENTRIES\n\
         2. EVERY INDEX from the input below MUST BE PRESENT in the response\n\
         3. DO NOT skip, combine, or delete ANY entries\n\
         4. If a text is empty, keep it empty - DO NOT delete the entry\n\
         5. Return a COMPLETE response - do not truncate or cut off\n\
         \n\
         Translation guidelines:\n\
         - Translate naturally using the full context above\n\
         - Maintain subtitle timing-appropriate length\n\
         - Keep tone and style consistent\n\
         - Preserve line breaks within subtitles\n\
         - Use commonly accepted {target_language} equivalents for technical terms\n\
         \n\
         JSON INPUT ({count} entries):\n\
         {mapping_json}\n\
         \n\
         RESPONSE FORMAT:\n\
         - Return ONLY the translated JSON object, mapping each index to its translated text\n\
         - Do NOT include explanations, comments, or markdown code fences\n\
         - The response must be a single complete and valid JSON object with all {count} entries present",
        source_language = source_language,
        target_language = target_language,
        context = request.context,
        count = count,
        mapping_json = mapping_json,
    )
}
