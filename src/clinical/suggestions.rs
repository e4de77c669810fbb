use crate::models::BodySystem;

use super::taxonomy::Taxonomy;
use super::types::{ClinicalConsiderations, DetectedPattern, ExamSuggestions};

/// Exam steps offered when no detected pattern carries its own.
pub const GENERIC_EXAM: [&str; 3] = [
    "Complete vital signs",
    "General physical examination oriented by symptoms",
    "Assessment of the patient's general status",
];

/// Union of the detected patterns' exam steps and studies, first-seen order.
/// Falls back to [`GENERIC_EXAM`] so the exam list is never empty.
pub fn suggest(detected: &[DetectedPattern]) -> ExamSuggestions {
    let mut exam = Vec::new();
    let mut studies = Vec::new();

    for d in detected {
        push_unique(&mut exam, &d.pattern.suggested_exam);
        push_unique(&mut studies, &d.pattern.suggested_studies);
    }

    if exam.is_empty() {
        exam = GENERIC_EXAM.iter().map(|s| s.to_string()).collect();
    }

    ExamSuggestions { exam, studies }
}

/// Non-diagnostic framing: systems involved, considerations of the detected
/// patterns, and the warning signs (from linked red-flag templates) worth
/// watching for.
pub fn clinical_considerations(detected: &[DetectedPattern], taxonomy: &Taxonomy) -> ClinicalConsiderations {
    let mut involved_systems: Vec<BodySystem> = Vec::new();
    let mut considerations = Vec::new();
    let mut watch_for = Vec::new();

    for d in detected {
        if !involved_systems.contains(&d.system()) {
            involved_systems.push(d.system());
        }
        push_unique(&mut considerations, &d.pattern.considerations);

        let descriptions: Vec<String> = d
            .pattern
            .red_flags
            .iter()
            .filter_map(|id| taxonomy.red_flag(id))
            .map(|flag| flag.description.clone())
            .collect();
        push_unique(&mut watch_for, &descriptions);
    }

    // taxonomy order, whatever order the caller passed
    involved_systems.sort_by_key(|system| {
        taxonomy
            .systems()
            .iter()
            .position(|s| s.system == *system)
            .unwrap_or(usize::MAX)
    });

    ClinicalConsiderations {
        involved_systems,
        considerations,
        watch_for,
    }
}

fn push_unique(target: &mut Vec<String>, items: &[String]) {
    for item in items {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinical::detection::detect;

    #[test]
    fn no_patterns_gives_generic_exam() {
        let suggestions = suggest(&[]);
        assert_eq!(suggestions.exam, GENERIC_EXAM.to_vec());
        assert!(suggestions.studies.is_empty());
    }

    #[test]
    fn lumbar_exam_includes_straight_leg_raise() {
        let taxonomy = Taxonomy::builtin();
        let detected = detect("dolor lumbar desde hace una semana", &taxonomy);
        let suggestions = suggest(&detected);
        assert!(suggestions
            .exam
            .iter()
            .any(|step| step.contains("Straight leg raise")));
        assert!(!suggestions.studies.is_empty());
    }

    #[test]
    fn shared_steps_are_listed_once() {
        let taxonomy = Taxonomy::builtin();
        // both carry the hydration and abdominal steps
        let detected = detect("náuseas y diarrea", &taxonomy);
        assert_eq!(detected.len(), 2);
        let suggestions = suggest(&detected);
        let hydration = suggestions
            .exam
            .iter()
            .filter(|s| s.as_str() == "Hydration status assessment")
            .count();
        assert_eq!(hydration, 1);
    }

    #[test]
    fn considerations_and_watch_list() {
        let taxonomy = Taxonomy::builtin();
        let detected = detect("tos seca y dolor lumbar", &taxonomy);
        let framing = clinical_considerations(&detected, &taxonomy);

        assert_eq!(
            framing.involved_systems,
            vec![BodySystem::Cardiopulmonary, BodySystem::Musculoskeletal]
        );
        assert!(framing
            .considerations
            .iter()
            .any(|c| c.contains("mechanical")));
        assert!(framing
            .watch_for
            .iter()
            .any(|w| w.contains("cauda equina")));
        assert!(framing
            .watch_for
            .iter()
            .any(|w| w.contains("respiratory")));
    }

    #[test]
    fn nothing_detected_gives_empty_framing() {
        let taxonomy = Taxonomy::builtin();
        assert_eq!(clinical_considerations(&[], &taxonomy), ClinicalConsiderations::default());
    }
}
