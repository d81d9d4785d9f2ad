use crate::subtitle_processor::parse_numeric_index;
use super::TranslationMapping;

// @module: Expected/received mapping reconciliation

/// Outcome of validating one chunk's received mapping against the request
///
/// A chunk either fully validates or is entirely rejected; there is no
/// partial acceptance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Number of entries requested
    pub expected_count: usize,

    /// Number of entries received
    pub received_count: usize,

    /// Requested indices absent from the response, in numeric order
    pub missing: Vec<String>,

    /// Response indices that were never requested, in numeric order
    pub extra: Vec<String>,
}

impl ValidationReport {
    /// Whether the received mapping exactly covers the expected key set
    ///
    /// Equal counts plus full expected-key coverage already close the
    /// condition; no separate extra-key check is needed.
    pub fn is_valid(&self) -> bool {
        self.expected_count == self.received_count && self.missing.is_empty()
    }

    /// Human-readable diagnostic line
    pub fn summary(&self) -> String {
        if self.is_valid() {
            format!("Validation passed: {} entries matched", self.received_count)
        } else {
            format!(
                "Validation failed: expected {} entries, received {} (missing: {:?}, extra: {:?})",
                self.expected_count, self.received_count, self.missing, self.extra
            )
        }
    }
}

/// Validate that a received mapping's key set exactly equals the expected one
pub fn validate_mapping(
    expected: &TranslationMapping,
    received: &TranslationMapping,
) -> ValidationReport {
    let mut missing: Vec<String> = expected
        .keys()
        .filter(|key| !received.contains_key(*key))
        .cloned()
        .collect();
    missing.sort_by_key(|key| parse_numeric_index(key));

    let mut extra: Vec<String> = received
        .keys()
        .filter(|key| !expected.contains_key(*key))
        .cloned()
        .collect();
    extra.sort_by_key(|key| parse_numeric_index(key));

    ValidationReport {
        expected_count: expected.len(),
        received_count: received.len(),
        missing,
        extra,
    }
}
