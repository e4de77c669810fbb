use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::models::{AttributeKind, BodySystem, HistoryItem, MedicationStatus, PriorityTier, Sex};

use super::report::ClinicalInfoReport;
use super::taxonomy::{PatternKey, SymptomPattern, TaxonomyError};

// ---------------------------------------------------------------------------
// TextSpan / PatientContext / HistoryGap
// ---------------------------------------------------------------------------

/// Char offsets into the normalized narrative, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

/// Demographics and medication use stated in the narrative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientContext {
    pub age_years: Option<u32>,
    pub sex: Option<Sex>,
    #[serde(default)]
    pub medications: MedicationStatus,
}

/// A clinical-history item the narrative leaves open, with its tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryGap {
    pub item: HistoryItem,
    pub tier: PriorityTier,
}

// ---------------------------------------------------------------------------
// DetectedPattern
// ---------------------------------------------------------------------------

/// A taxonomy pattern found in the narrative.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedPattern {
    pub pattern: Arc<SymptomPattern>,
    /// Subset of the expected attributes, in taxonomy order.
    pub detected_attributes: Vec<AttributeKind>,
    pub source_span: Option<TextSpan>,
}

impl DetectedPattern {
    pub fn key(&self) -> PatternKey {
        self.pattern.key()
    }

    pub fn system(&self) -> BodySystem {
        self.pattern.system
    }

    pub fn name(&self) -> &str {
        &self.pattern.name
    }

    pub fn has_attribute(&self, kind: AttributeKind) -> bool {
        self.detected_attributes.contains(&kind)
    }
}

impl Serialize for DetectedPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.source_span.is_some() { 4 } else { 3 };
        let mut s = serializer.serialize_struct("DetectedPattern", fields)?;
        s.serialize_field("system", &self.pattern.system)?;
        s.serialize_field("name", &self.pattern.name)?;
        s.serialize_field("detectedAttributes", &self.detected_attributes)?;
        if let Some(span) = &self.source_span {
            s.serialize_field("sourceSpan", span)?;
        } else {
            s.skip_field("sourceSpan")?;
        }
        s.end()
    }
}

// ---------------------------------------------------------------------------
// CompletenessRecord
// ---------------------------------------------------------------------------

/// How completely one detected pattern was characterized.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletenessRecord {
    pub pattern: Arc<SymptomPattern>,
    pub detected_attributes: Vec<AttributeKind>,
    pub missing_attributes: Vec<AttributeKind>,
    /// `round(100 * detected / expected)`, always within 0..=100.
    pub completeness_percent: u8,
}

impl CompletenessRecord {
    pub fn key(&self) -> PatternKey {
        self.pattern.key()
    }
}

impl Serialize for CompletenessRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("CompletenessRecord", 5)?;
        s.serialize_field("system", &self.pattern.system)?;
        s.serialize_field("pattern", &self.pattern.name)?;
        s.serialize_field("completenessPercent", &self.completeness_percent)?;
        s.serialize_field("detectedAttributes", &self.detected_attributes)?;
        s.serialize_field("missingAttributes", &self.missing_attributes)?;
        s.end()
    }
}

// ---------------------------------------------------------------------------
// PriorityAssignment
// ---------------------------------------------------------------------------

/// One missing attribute of one detected pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingItem {
    pub pattern: Arc<SymptomPattern>,
    pub attribute: AttributeKind,
}

impl MissingItem {
    pub fn key(&self) -> (BodySystem, &str, AttributeKind) {
        (self.pattern.system, self.pattern.name.as_str(), self.attribute)
    }
}

impl Serialize for MissingItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("MissingItem", 3)?;
        s.serialize_field("system", &self.pattern.system)?;
        s.serialize_field("pattern", &self.pattern.name)?;
        s.serialize_field("attribute", &self.attribute)?;
        s.end()
    }
}

/// Missing items split into tiers. Every item lands in exactly one tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriorityAssignment {
    pub high: Vec<MissingItem>,
    pub medium: Vec<MissingItem>,
    pub low: Vec<MissingItem>,
}

impl PriorityAssignment {
    pub fn tier(&self, tier: PriorityTier) -> &[MissingItem] {
        match tier {
            PriorityTier::High => &self.high,
            PriorityTier::Medium => &self.medium,
            PriorityTier::Low => &self.low,
        }
    }

    pub(crate) fn tier_mut(&mut self, tier: PriorityTier) -> &mut Vec<MissingItem> {
        match tier {
            PriorityTier::High => &mut self.high,
            PriorityTier::Medium => &mut self.medium,
            PriorityTier::Low => &mut self.low,
        }
    }

    /// Items with their tier, High first.
    pub fn iter(&self) -> impl Iterator<Item = (PriorityTier, &MissingItem)> {
        [PriorityTier::High, PriorityTier::Medium, PriorityTier::Low]
            .into_iter()
            .flat_map(move |tier| self.tier(tier).iter().map(move |item| (tier, item)))
    }

    pub fn total(&self) -> usize {
        self.high.len() + self.medium.len() + self.low.len()
    }

    pub fn tier_of(&self, system: BodySystem, pattern: &str, attribute: AttributeKind) -> Option<PriorityTier> {
        self.iter()
            .find(|(_, item)| item.key() == (system, pattern, attribute))
            .map(|(tier, _)| tier)
    }
}

// ---------------------------------------------------------------------------
// PrioritizedQuestions
// ---------------------------------------------------------------------------

/// Rendered follow-up questions per tier. A string appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritizedQuestions {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

impl PrioritizedQuestions {
    pub fn total(&self) -> usize {
        self.high.len() + self.medium.len() + self.low.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn tier(&self, tier: PriorityTier) -> &[String] {
        match tier {
            PriorityTier::High => &self.high,
            PriorityTier::Medium => &self.medium,
            PriorityTier::Low => &self.low,
        }
    }

    pub(crate) fn tier_mut(&mut self, tier: PriorityTier) -> &mut Vec<String> {
        match tier {
            PriorityTier::High => &mut self.high,
            PriorityTier::Medium => &mut self.medium,
            PriorityTier::Low => &mut self.low,
        }
    }

    /// First `n` questions in priority order.
    pub fn top(&self, n: usize) -> Vec<&str> {
        self.high
            .iter()
            .chain(&self.medium)
            .chain(&self.low)
            .take(n)
            .map(String::as_str)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// RedFlagAlert
// ---------------------------------------------------------------------------

/// A fired red-flag template. Always backed by at least two distinct
/// key phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedFlagAlert {
    pub system: BodySystem,
    pub triggered_template: String,
    pub description: String,
    pub matched_phrases: Vec<String>,
    pub recommended_action: String,
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSuggestions {
    pub exam: Vec<String>,
    pub studies: Vec<String>,
}

/// Non-diagnostic framing for the detected presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalConsiderations {
    pub involved_systems: Vec<BodySystem>,
    pub considerations: Vec<String>,
    pub watch_for: Vec<String>,
}

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Inconsistent report parts: {0}")]
    Consistency(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),
}

// ---------------------------------------------------------------------------
// ClinicalInfoEngine trait
// ---------------------------------------------------------------------------

/// Evaluates clinical narratives into completeness reports.
pub trait ClinicalInfoEngine: Send + Sync {
    /// Evaluate one narrative.
    fn evaluate(&self, narrative: &str) -> Result<ClinicalInfoReport, EngineError>;

    /// Evaluate a narrative extended with newly gathered information.
    /// Equivalent to evaluating `base + " " + supplement`.
    fn evaluate_incremental(
        &self,
        base: &str,
        supplement: &str,
    ) -> Result<ClinicalInfoReport, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinical::taxonomy::Taxonomy;

    #[test]
    fn top_questions_follow_priority_order() {
        let questions = PrioritizedQuestions {
            high: vec!["a".into(), "b".into()],
            medium: vec!["c".into()],
            low: vec!["d".into()],
        };
        assert_eq!(questions.top(3), vec!["a", "b", "c"]);
        assert_eq!(questions.top(10).len(), 4);
        assert!(questions.top(0).is_empty());
    }

    #[test]
    fn detected_pattern_serializes_flat() {
        let taxonomy = Taxonomy::builtin();
        let pattern = taxonomy
            .find_pattern(BodySystem::Digestive, "diarrea")
            .unwrap()
            .clone();
        let detected = DetectedPattern {
            pattern,
            detected_attributes: vec![AttributeKind::Frequency],
            source_span: None,
        };
        let json = serde_json::to_value(&detected).unwrap();
        assert_eq!(json["system"], "digestive");
        assert_eq!(json["name"], "diarrea");
        assert_eq!(json["detectedAttributes"][0], "frequency");
        assert!(json.get("sourceSpan").is_none());
    }

    #[test]
    fn assignment_iterates_high_first() {
        let taxonomy = Taxonomy::builtin();
        let pattern = taxonomy
            .find_pattern(BodySystem::Digestive, "diarrea")
            .unwrap()
            .clone();
        let assignment = PriorityAssignment {
            high: vec![],
            medium: vec![MissingItem {
                pattern: pattern.clone(),
                attribute: AttributeKind::Quality,
            }],
            low: vec![MissingItem {
                pattern,
                attribute: AttributeKind::AssociatedSymptoms,
            }],
        };
        let tiers: Vec<PriorityTier> = assignment.iter().map(|(t, _)| t).collect();
        assert_eq!(tiers, vec![PriorityTier::Medium, PriorityTier::Low]);
        assert_eq!(assignment.total(), 2);
        assert_eq!(
            assignment.tier_of(BodySystem::Digestive, "diarrea", AttributeKind::Quality),
            Some(PriorityTier::Medium)
        );
    }
}
