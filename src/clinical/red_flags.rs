use super::helpers::{contains_phrase, normalize};
use super::taxonomy::{RedFlagTemplate, Taxonomy};
use super::types::RedFlagAlert;

/// Fewest distinct key phrases that can raise an alert.
pub const MIN_CORROBORATING_PHRASES: usize = 2;

// ── Matching logic ──────────────────────────────────────────

/// Check every red-flag template against the narrative.
///
/// A template fires when at least `min_corroboration` distinct key phrases
/// occur; values below [`MIN_CORROBORATING_PHRASES`] are raised to it, so a
/// single phrase never raises an alert. Alerts follow taxonomy system order,
/// then template order.
pub fn detect_red_flags(text: &str, taxonomy: &Taxonomy, min_corroboration: usize) -> Vec<RedFlagAlert> {
    let normalized = normalize(text);
    if normalized.trim().is_empty() {
        return Vec::new();
    }
    let required = min_corroboration.max(MIN_CORROBORATING_PHRASES);

    let mut alerts = Vec::new();
    for template in taxonomy.red_flags() {
        let matched = matched_phrases(&normalized, template);
        if matched.len() < required {
            continue;
        }

        tracing::warn!(
            template = %template.id,
            system = %template.system,
            matched = matched.len(),
            "Red-flag template fired"
        );

        alerts.push(RedFlagAlert {
            system: template.system,
            triggered_template: template.id.clone(),
            description: template.description.clone(),
            matched_phrases: matched,
            recommended_action: template.recommended_action.clone(),
        });
    }
    alerts
}

/// Labels of the template's key phrases present in the text, each once.
fn matched_phrases(normalized: &str, template: &RedFlagTemplate) -> Vec<String> {
    let mut matched: Vec<String> = Vec::new();
    for phrase in &template.key_phrases {
        if matched.contains(&phrase.label) {
            continue;
        }
        if phrase.forms().any(|form| contains_phrase(normalized, form)) {
            matched.push(phrase.label.clone());
        }
    }
    matched
}
