use std::collections::HashSet;

use serde::Serialize;

use crate::models::{AttributeKind, BodySystem};

use super::completeness::overall_completeness;
use super::history::is_open;
use super::types::{
    ClinicalConsiderations, CompletenessRecord, DetectedPattern, EngineError, ExamSuggestions,
    HistoryGap, PatientContext, PrioritizedQuestions, PriorityAssignment, RedFlagAlert,
};

/// Everything the pipeline produced for one narrative.
#[derive(Debug, Clone, Default)]
pub struct ReportParts {
    pub detected: Vec<DetectedPattern>,
    pub completeness: Vec<CompletenessRecord>,
    pub assignment: PriorityAssignment,
    pub questions: PrioritizedQuestions,
    pub suggestions: ExamSuggestions,
    pub red_flags: Vec<RedFlagAlert>,
    pub considerations: ClinicalConsiderations,
    pub patient: PatientContext,
    pub history: Vec<HistoryGap>,
}

/// Result of one evaluation. Immutable once composed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalInfoReport {
    detected_patterns: Vec<DetectedPattern>,
    completeness: Vec<CompletenessRecord>,
    overall_completeness_percent: Option<u8>,
    questions: PrioritizedQuestions,
    suggested_exam: Vec<String>,
    suggested_studies: Vec<String>,
    red_flags: Vec<RedFlagAlert>,
    involved_systems: Vec<BodySystem>,
    considerations: Vec<String>,
    watch_for: Vec<String>,
    patient: PatientContext,
    missing_history: Vec<HistoryGap>,
}

impl ClinicalInfoReport {
    pub fn detected_patterns(&self) -> &[DetectedPattern] {
        &self.detected_patterns
    }

    pub fn completeness(&self) -> &[CompletenessRecord] {
        &self.completeness
    }

    pub fn completeness_for(&self, pattern: &str) -> Option<&CompletenessRecord> {
        self.completeness.iter().find(|r| r.pattern.name == pattern)
    }

    pub fn overall_completeness_percent(&self) -> Option<u8> {
        self.overall_completeness_percent
    }

    pub fn questions(&self) -> &PrioritizedQuestions {
        &self.questions
    }

    pub fn suggested_exam(&self) -> &[String] {
        &self.suggested_exam
    }

    pub fn suggested_studies(&self) -> &[String] {
        &self.suggested_studies
    }

    pub fn red_flags(&self) -> &[RedFlagAlert] {
        &self.red_flags
    }

    pub fn has_red_flags(&self) -> bool {
        !self.red_flags.is_empty()
    }

    pub fn involved_systems(&self) -> &[BodySystem] {
        &self.involved_systems
    }

    pub fn considerations(&self) -> &[String] {
        &self.considerations
    }

    pub fn watch_for(&self) -> &[String] {
        &self.watch_for
    }

    pub fn patient(&self) -> &PatientContext {
        &self.patient
    }

    pub fn missing_history(&self) -> &[HistoryGap] {
        &self.missing_history
    }
}

/// Assemble a report, rejecting parts that do not fit together.
pub fn compose(parts: ReportParts) -> Result<ClinicalInfoReport, EngineError> {
    check_consistency(&parts)?;

    let ReportParts {
        detected,
        completeness,
        assignment: _,
        questions,
        suggestions,
        red_flags,
        considerations,
        patient,
        history,
    } = parts;

    Ok(ClinicalInfoReport {
        overall_completeness_percent: overall_completeness(&completeness),
        detected_patterns: detected,
        completeness,
        questions,
        suggested_exam: suggestions.exam,
        suggested_studies: suggestions.studies,
        red_flags,
        involved_systems: considerations.involved_systems,
        considerations: considerations.considerations,
        watch_for: considerations.watch_for,
        patient,
        missing_history: history,
    })
}

fn check_consistency(parts: &ReportParts) -> Result<(), EngineError> {
    let detected_keys: HashSet<_> = parts.detected.iter().map(DetectedPattern::key).collect();
    let record_keys: HashSet<_> = parts.completeness.iter().map(CompletenessRecord::key).collect();

    for record in &parts.completeness {
        let key = record.key();
        if !detected_keys.contains(&key) {
            return Err(inconsistent(format!(
                "completeness record for {}/{} has no detected pattern",
                key.system, key.name
            )));
        }
        check_partition(record)?;
    }

    if let Some(orphan) = parts.detected.iter().find(|d| !record_keys.contains(&d.key())) {
        return Err(inconsistent(format!(
            "detected pattern {}/{} has no completeness record",
            orphan.system(),
            orphan.name()
        )));
    }

    let missing: HashSet<(BodySystem, &str, AttributeKind)> = parts
        .completeness
        .iter()
        .flat_map(|r| {
            r.missing_attributes
                .iter()
                .map(move |a| (r.pattern.system, r.pattern.name.as_str(), *a))
        })
        .collect();

    for (tier, item) in parts.assignment.iter() {
        if !missing.contains(&item.key()) {
            return Err(inconsistent(format!(
                "{} item {}/{}/{} is not a missing attribute",
                tier, item.pattern.system, item.pattern.name, item.attribute
            )));
        }
    }

    if parts.assignment.total() != missing.len() {
        return Err(inconsistent(format!(
            "priority buckets hold {} items for {} missing attributes",
            parts.assignment.total(),
            missing.len()
        )));
    }

    check_history(&parts.patient, &parts.history)
}

/// History gaps must be open for the patient and listed once each.
fn check_history(patient: &PatientContext, history: &[HistoryGap]) -> Result<(), EngineError> {
    let mut seen = HashSet::new();
    for gap in history {
        if !seen.insert(gap.item) {
            return Err(inconsistent(format!("history item {} listed twice", gap.item)));
        }
        if !is_open(patient, gap.item) {
            return Err(inconsistent(format!(
                "history item {} is already stated in the narrative",
                gap.item
            )));
        }
    }
    Ok(())
}

/// Detected and missing attributes must split the expected ones exactly.
fn check_partition(record: &CompletenessRecord) -> Result<(), EngineError> {
    let expected: HashSet<AttributeKind> = record.pattern.expected_kinds().collect();
    let mut seen = HashSet::new();
    let all = record
        .detected_attributes
        .iter()
        .chain(&record.missing_attributes);

    for attribute in all {
        if !expected.contains(attribute) || !seen.insert(*attribute) {
            return Err(inconsistent(format!(
                "completeness record for {} is not a partition of its expected attributes",
                record.pattern.name
            )));
        }
    }
    if seen.len() != expected.len() || record.completeness_percent > 100 {
        return Err(inconsistent(format!(
            "completeness record for {} is not a partition of its expected attributes",
            record.pattern.name
        )));
    }
    Ok(())
}

fn inconsistent(message: String) -> EngineError {
    tracing::error!(reason = %message, "Report parts rejected");
    EngineError::Consistency(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinical::completeness::evaluate;
    use crate::clinical::detection::detect;
    use crate::clinical::priority::prioritize;
    use crate::clinical::questions::generate_questions;
    use crate::clinical::suggestions::suggest;
    use crate::clinical::taxonomy::Taxonomy;
    use crate::clinical::types::MissingItem;
    use crate::config::PriorityThresholds;
    use crate::models::{HistoryItem, Language, PriorityTier};

    fn parts_for(text: &str, taxonomy: &Taxonomy) -> ReportParts {
        let detected = detect(text, taxonomy);
        let completeness = evaluate(&detected);
        let assignment = prioritize(&completeness, taxonomy, &PriorityThresholds::default());
        let questions = generate_questions(&assignment, &[], Language::En);
        ReportParts {
            suggestions: suggest(&detected),
            detected,
            completeness,
            assignment,
            questions,
            ..ReportParts::default()
        }
    }

    #[test]
    fn consistent_parts_compose() {
        let taxonomy = Taxonomy::builtin();
        let report = compose(parts_for("dolor lumbar de 3 días, empeora al agacharse", &taxonomy)).unwrap();
        assert_eq!(report.detected_patterns().len(), 1);
        assert_eq!(report.overall_completeness_percent(), Some(40));
        assert_eq!(report.questions().high.len(), 3);
    }

    #[test]
    fn empty_parts_compose() {
        let report = compose(ReportParts::default()).unwrap();
        assert!(report.detected_patterns().is_empty());
        assert_eq!(report.overall_completeness_percent(), None);
    }

    #[test]
    fn record_without_detection_rejected() {
        let taxonomy = Taxonomy::builtin();
        let mut parts = parts_for("dolor lumbar", &taxonomy);
        parts.detected.clear();
        let err = compose(parts).unwrap_err();
        assert!(matches!(err, EngineError::Consistency(msg) if msg.contains("no detected pattern")));
    }

    #[test]
    fn detection_without_record_rejected() {
        let taxonomy = Taxonomy::builtin();
        let mut parts = parts_for("dolor lumbar", &taxonomy);
        parts.completeness.clear();
        parts.assignment = PriorityAssignment::default();
        let err = compose(parts).unwrap_err();
        assert!(matches!(err, EngineError::Consistency(msg) if msg.contains("no completeness record")));
    }

    #[test]
    fn broken_partition_rejected() {
        let taxonomy = Taxonomy::builtin();
        let mut parts = parts_for("dolor lumbar", &taxonomy);
        parts.completeness[0].missing_attributes.pop();
        assert!(matches!(compose(parts), Err(EngineError::Consistency(_))));

        let mut parts = parts_for("dolor lumbar", &taxonomy);
        parts.completeness[0].missing_attributes.push(AttributeKind::Radiation);
        assert!(matches!(compose(parts), Err(EngineError::Consistency(_))));
    }

    #[test]
    fn foreign_priority_item_rejected() {
        let taxonomy = Taxonomy::builtin();
        let mut parts = parts_for("dolor lumbar", &taxonomy);
        let pattern = parts.detected[0].pattern.clone();
        parts.assignment.low.push(MissingItem {
            pattern,
            attribute: AttributeKind::Radiation,
        });
        let err = compose(parts).unwrap_err();
        assert!(matches!(err, EngineError::Consistency(msg) if msg.contains("not a missing attribute")));
    }

    #[test]
    fn incomplete_buckets_rejected() {
        let taxonomy = Taxonomy::builtin();
        let mut parts = parts_for("dolor lumbar", &taxonomy);
        parts.assignment.high.pop();
        let err = compose(parts).unwrap_err();
        assert!(matches!(err, EngineError::Consistency(msg) if msg.contains("priority buckets")));
    }

    #[test]
    fn stated_history_item_rejected() {
        let taxonomy = Taxonomy::builtin();
        let mut parts = parts_for("dolor lumbar", &taxonomy);
        parts.patient.age_years = Some(56);
        parts.history.push(HistoryGap {
            item: HistoryItem::Age,
            tier: PriorityTier::High,
        });
        let err = compose(parts).unwrap_err();
        assert!(matches!(err, EngineError::Consistency(msg) if msg.contains("already stated")));
    }

    #[test]
    fn repeated_history_item_rejected() {
        let taxonomy = Taxonomy::builtin();
        let mut parts = parts_for("dolor lumbar", &taxonomy);
        let gap = HistoryGap {
            item: HistoryItem::Sex,
            tier: PriorityTier::Low,
        };
        parts.history = vec![gap, gap];
        let err = compose(parts).unwrap_err();
        assert!(matches!(err, EngineError::Consistency(msg) if msg.contains("listed twice")));
    }

    #[test]
    fn report_serializes_camel_case() {
        let taxonomy = Taxonomy::builtin();
        let report = compose(parts_for("dolor lumbar de 3 días", &taxonomy)).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["detectedPatterns"][0]["name"], "dolor lumbar");
        assert_eq!(json["detectedPatterns"][0]["system"], "musculoskeletal");
        assert_eq!(json["completeness"][0]["pattern"], "dolor lumbar");
        assert_eq!(json["completeness"][0]["completenessPercent"], 20);
        assert_eq!(json["completeness"][0]["missingAttributes"][0], "intensity");
        assert!(json["questions"]["high"].is_array());
        assert!(json["suggestedExam"].is_array());
        assert!(json["redFlags"].as_array().unwrap().is_empty());
        assert!(json["patient"].is_object());
        assert!(json.get("watchFor").is_some());
        assert!(json["missingHistory"].as_array().unwrap().is_empty());
        assert_eq!(json["patient"]["medications"], "notMentioned");
    }
}
