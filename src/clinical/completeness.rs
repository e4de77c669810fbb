use std::sync::Arc;

use super::types::{CompletenessRecord, DetectedPattern};

/// One record per detected pattern, splitting its expected attributes into
/// detected and missing (both in taxonomy order).
pub fn evaluate(detected: &[DetectedPattern]) -> Vec<CompletenessRecord> {
    detected.iter().map(record_for).collect()
}

fn record_for(detected: &DetectedPattern) -> CompletenessRecord {
    let pattern = &detected.pattern;
    let (present, missing): (Vec<_>, Vec<_>) = pattern
        .expected_kinds()
        .partition(|kind| detected.detected_attributes.contains(kind));

    CompletenessRecord {
        pattern: Arc::clone(pattern),
        completeness_percent: percent(present.len(), pattern.expected_attributes.len()),
        detected_attributes: present,
        missing_attributes: missing,
    }
}

/// Share of all expected attributes that were described, across every
/// detected pattern. `None` when nothing was detected.
pub fn overall_completeness(records: &[CompletenessRecord]) -> Option<u8> {
    if records.is_empty() {
        return None;
    }
    let (detected, expected) = records.iter().fold((0, 0), |(d, e), r| {
        (
            d + r.detected_attributes.len(),
            e + r.detected_attributes.len() + r.missing_attributes.len(),
        )
    });
    Some(percent(detected, expected))
}

/// `round(100 * part / whole)`, clamped to 0..=100. An empty whole counts as
/// fully described.
fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 100;
    }
    let value = (100.0 * part as f64 / whole as f64).round();
    value.clamp(0.0, 100.0) as u8
}
