use std::collections::HashSet;
use std::sync::Arc;

use crate::config::PriorityThresholds;
use crate::models::{AttributeKind, PriorityTier};

use super::taxonomy::Taxonomy;
use super::types::{CompletenessRecord, MissingItem, PriorityAssignment};

/// Tier for one missing attribute. First matching rule wins:
/// 1. red-flag-associated pattern, or completeness below `urgent_below` → High
/// 2. essential attribute → High; completeness below `partial_below` → Medium
/// 3. otherwise → Low
pub fn classify(
    attribute: AttributeKind,
    completeness_percent: u8,
    red_flag_associated: bool,
    thresholds: &PriorityThresholds,
) -> PriorityTier {
    if red_flag_associated || completeness_percent < thresholds.urgent_below {
        PriorityTier::High
    } else if attribute.is_essential() {
        PriorityTier::High
    } else if completeness_percent < thresholds.partial_below {
        PriorityTier::Medium
    } else {
        PriorityTier::Low
    }
}

/// Place every missing attribute of every record in exactly one tier.
/// Within a tier, items follow taxonomy order (pattern, then attribute).
pub fn prioritize(
    records: &[CompletenessRecord],
    taxonomy: &Taxonomy,
    thresholds: &PriorityThresholds,
) -> PriorityAssignment {
    let mut ordered: Vec<&CompletenessRecord> = records.iter().collect();
    ordered.sort_by_key(|r| taxonomy.pattern_position(&r.pattern).unwrap_or(usize::MAX));

    let mut assignment = PriorityAssignment::default();
    let mut seen = HashSet::new();

    for record in ordered {
        let associated = taxonomy.is_red_flag_associated(&record.pattern);

        let mut missing = record.missing_attributes.clone();
        missing.sort_by_key(|kind| record.pattern.attribute_position(*kind).unwrap_or(usize::MAX));

        for attribute in missing {
            if !seen.insert((record.pattern.system, record.pattern.name.clone(), attribute)) {
                continue;
            }
            let tier = classify(attribute, record.completeness_percent, associated, thresholds);
            assignment.tier_mut(tier).push(MissingItem {
                pattern: Arc::clone(&record.pattern),
                attribute,
            });
        }
    }

    assignment
}
