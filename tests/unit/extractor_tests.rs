/*!
 * Tests for lenient JSON recovery from model output
 */

use aisubtrans::translation::extractor::extract_mapping;

/// Test strict decoding of a bare JSON object
#[test]
fn test_extract_mapping_withBareObject_shouldDecode() {
    let mapping = extract_mapping(r#"{"1": "uno", "2": "dos"}"#);

    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping["1"], "uno");
    assert_eq!(mapping["2"], "dos");
}

/// Test recovery from a fenced block with a language tag
#[test]
fn test_extract_mapping_withJsonFence_shouldStripFencing() {
    let raw = "```json\n{\"1\": \"uno\", \"2\": \"dos\"}\n```";
    let mapping = extract_mapping(raw);

    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping["2"], "dos");
}

/// Test recovery from a fenced block without a language tag
#[test]
fn test_extract_mapping_withPlainFence_shouldStripFencing() {
    let raw = "```\n{\"1\": \"uno\"}\n```";
    let mapping = extract_mapping(raw);

    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping["1"], "uno");
}

/// Test prefix/suffix fence stripping when the fence is unterminated
#[test]
fn test_extract_mapping_withUnterminatedFence_shouldStripPrefix() {
    let raw = "```json\n{\"1\": \"uno\"}";
    let mapping = extract_mapping(raw);

    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping["1"], "uno");
}

/// Test the brace-scan fallback with leading and trailing prose
#[test]
fn test_extract_mapping_withSurroundingProse_shouldRecoverObject() {
    let raw = "Here is your translation:\n{\"1\": \"uno\", \"2\": \"dos\"}\nLet me know if you need anything else!";
    let mapping = extract_mapping(raw);

    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping["1"], "uno");
}

/// Test that text with no brace-delimited object yields an empty mapping
#[test]
fn test_extract_mapping_withNoObject_shouldReturnEmpty() {
    assert!(extract_mapping("I cannot translate that, sorry.").is_empty());
    assert!(extract_mapping("").is_empty());
}

/// Test that undecodable brace content yields an empty mapping
#[test]
fn test_extract_mapping_withBrokenJson_shouldReturnEmpty() {
    // Truncated mid-entry, unrecoverable by either stage
    let raw = r#"{"1": "uno", "2": "do"#;
    assert!(extract_mapping(raw).is_empty());
}

/// Test decoding of the nested object value shape
#[test]
fn test_extract_mapping_withNestedTextObjects_shouldFlatten() {
    let raw = r#"{"1": {"text": "uno"}, "2": {"text": "dos"}}"#;
    let mapping = extract_mapping(raw);

    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping["1"], "uno");
    assert_eq!(mapping["2"], "dos");
}

/// Test that non-string, non-object values fail the decode entirely
#[test]
fn test_extract_mapping_withNumericValues_shouldReturnEmpty() {
    assert!(extract_mapping(r#"{"1": 42}"#).is_empty());
}

/// Test that empty string values are preserved
#[test]
fn test_extract_mapping_withEmptyStringValue_shouldKeepEntry() {
    let mapping = extract_mapping(r#"{"1": "", "2": "dos"}"#);

    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping["1"], "");
}

/// Test that a non-object JSON document yields an empty mapping
#[test]
fn test_extract_mapping_withJsonArray_shouldReturnEmpty() {
    assert!(extract_mapping(r#"["uno", "dos"]"#).is_empty());
}
