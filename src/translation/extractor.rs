use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use log::{debug, warn};

use super::TranslationMapping;

// @module: Lenient JSON recovery from raw model output
//
// Models occasionally wrap the object in markdown fencing or surround it with
// a small amount of prose despite instructions. Recovery is an explicit
// two-stage parser: strict decode of the fence-stripped text, then a bounded
// best-effort decode of the widest brace-delimited substring.

// @const: Innermost fenced JSON-object block, with optional language tag
static FENCED_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").unwrap()
});

// @const: Leading fence marker
static FENCE_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^```(?:json)?\s*").unwrap()
});

// @const: Trailing fence marker
static FENCE_CLOSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*```$").unwrap()
});

/// Recover a translation mapping from raw model output
///
/// Returns an empty mapping when no JSON object can be recovered at all;
/// callers treat that as total extraction failure.
pub fn extract_mapping(raw: &str) -> TranslationMapping {
    let cleaned = strip_code_fences(raw.trim());

    if let Some(mapping) = decode_object(&cleaned) {
        return mapping;
    }

    // Stage two: the widest substring bounded by the first '{' and the
    // last '}' of the original text
    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            if let Some(mapping) = decode_object(&raw[start..=end]) {
                debug!("Recovered JSON object with {} entries via brace scan", mapping.len());
                return mapping;
            }
        }
    }

    warn!("Could not extract a JSON object from response ({} chars)", raw.len());
    TranslationMapping::new()
}

/// Remove markdown code fencing, if present
///
/// Prefers the innermost fenced block that looks like a JSON object;
/// otherwise strips bare leading/trailing fence markers.
fn strip_code_fences(text: &str) -> String {
    if !text.contains("```") {
        return text.to_string();
    }

    if let Some(captures) = FENCED_OBJECT.captures(text) {
        return captures[1].to_string();
    }

    let without_open = FENCE_OPEN.replace(text, "");
    FENCE_CLOSE.replace(&without_open, "").to_string()
}

/// Strict decode of one JSON object into a flat index-to-text mapping
///
/// Values may be plain strings or objects carrying a "text" field (the
/// original wire shape); anything else fails the decode.
fn decode_object(text: &str) -> Option<TranslationMapping> {
    let value: Value = serde_json::from_str(text).ok()?;
    let object = value.as_object()?;

    let mut mapping = TranslationMapping::with_capacity(object.len());
    for (index, entry) in object {
        let text = match entry {
            Value::String(s) => s.clone(),
            Value::Object(fields) => fields.get("text")?.as_str()?.to_string(),
            _ => return None,
        };
        mapping.insert(index.clone(), text);
    }

    Some(mapping)
}
