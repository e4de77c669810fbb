use std::sync::Arc;

use crate::models::AttributeKind;

use super::helpers::{
    char_offset, contains_phrase, find_phrase, has_duration_mention, has_intensity_rating,
    normalize,
};
use super::taxonomy::{ExpectedAttribute, SymptomPattern, Taxonomy};
use super::types::{DetectedPattern, TextSpan};

/// Facts about the narrative computed once and shared by every pattern.
struct Narrative {
    normalized: String,
    duration_mentioned: bool,
    intensity_rated: bool,
}

impl Narrative {
    fn new(text: &str) -> Self {
        let normalized = normalize(text);
        Self {
            duration_mentioned: has_duration_mention(&normalized),
            intensity_rated: has_intensity_rating(&normalized),
            normalized,
        }
    }
}

/// Find the taxonomy's symptom patterns in a narrative.
///
/// A pattern registers when its name, an alias, or a cue of an attribute
/// flagged `implies_pattern` occurs. Its detected attributes are those whose
/// own cues or generic lexicon cues occur, plus duration and intensity when
/// the narrative states a numeric duration or a rating. Each taxonomy pattern
/// is visited once, so results are unique per `(system, name)` and come out
/// in taxonomy order.
pub fn detect(text: &str, taxonomy: &Taxonomy) -> Vec<DetectedPattern> {
    let narrative = Narrative::new(text);
    if narrative.normalized.trim().is_empty() {
        return Vec::new();
    }

    let mut detected = Vec::new();
    for pattern in taxonomy.patterns() {
        let Some(span) = locate(&narrative.normalized, pattern) else {
            continue;
        };

        let detected_attributes: Vec<AttributeKind> = pattern
            .expected_attributes
            .iter()
            .filter(|attribute| attribute_present(&narrative, attribute, taxonomy))
            .map(|attribute| attribute.kind)
            .collect();

        tracing::debug!(
            system = %pattern.system,
            pattern = %pattern.name,
            detected = detected_attributes.len(),
            expected = pattern.expected_attributes.len(),
            "Symptom pattern detected"
        );

        detected.push(DetectedPattern {
            pattern: Arc::clone(pattern),
            detected_attributes,
            source_span: Some(span),
        });
    }
    detected
}

/// Earliest mention of the pattern, if any.
fn locate(normalized: &str, pattern: &SymptomPattern) -> Option<TextSpan> {
    let names = std::iter::once(pattern.name.as_str())
        .chain(pattern.aliases.iter().map(String::as_str));
    let implying_cues = pattern
        .expected_attributes
        .iter()
        .filter(|attribute| attribute.implies_pattern)
        .flat_map(|attribute| attribute.cues.iter().map(String::as_str));

    names
        .chain(implying_cues)
        .filter_map(|form| find_phrase(normalized, form).map(|idx| (idx, form)))
        .min_by_key(|(idx, _)| *idx)
        .map(|(idx, form)| {
            let start = char_offset(normalized, idx);
            TextSpan {
                start,
                end: start + normalize(form).trim().chars().count(),
            }
        })
}

fn attribute_present(narrative: &Narrative, attribute: &ExpectedAttribute, taxonomy: &Taxonomy) -> bool {
    let text = narrative.normalized.as_str();
    if attribute.cues.iter().any(|cue| contains_phrase(text, cue)) {
        return true;
    }
    if taxonomy
        .generic_cues(attribute.kind)
        .iter()
        .any(|cue| contains_phrase(text, cue))
    {
        return true;
    }
    match attribute.kind {
        AttributeKind::Duration => narrative.duration_mentioned,
        AttributeKind::Intensity => narrative.intensity_rated,
        _ => false,
    }
}
