use std::sync::Arc;
use std::time::Instant;

use crate::config::EngineConfig;

use super::completeness::evaluate;
use super::detection::detect;
use super::helpers::{extract_patient_context, normalize};
use super::history::history_gaps;
use super::priority::prioritize;
use super::questions::generate_questions;
use super::red_flags::detect_red_flags;
use super::report::{compose, ClinicalInfoReport, ReportParts};
use super::suggestions::{clinical_considerations, suggest};
use super::taxonomy::Taxonomy;
use super::types::{ClinicalInfoEngine, EngineError};

/// Default implementation of the clinical information engine.
/// Runs detection, completeness, prioritization, question rendering,
/// red-flag checks and suggestions over one narrative, then composes the report.
#[derive(Debug, Clone)]
pub struct DefaultClinicalInfoEngine {
    taxonomy: Arc<Taxonomy>,
    config: EngineConfig,
}

impl DefaultClinicalInfoEngine {
    pub fn new(taxonomy: Arc<Taxonomy>, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { taxonomy, config })
    }

    /// Engine over the bundled taxonomy with default settings.
    pub fn with_builtin_taxonomy() -> Self {
        Self {
            taxonomy: Arc::new(Taxonomy::builtin()),
            config: EngineConfig::default(),
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate a JSON request `{ "narrative": string, "supplement"?: string | null }`.
    pub fn evaluate_request(
        &self,
        request: &serde_json::Value,
    ) -> Result<ClinicalInfoReport, EngineError> {
        let narrative = match request.get("narrative") {
            Some(serde_json::Value::String(text)) => text,
            Some(serde_json::Value::Null) | None => {
                return Err(EngineError::InvalidInput("narrative is required".into()));
            }
            Some(other) => {
                return Err(EngineError::InvalidInput(format!(
                    "narrative must be a string, got {}",
                    json_type(other)
                )));
            }
        };

        match request.get("supplement") {
            Some(serde_json::Value::String(supplement)) => {
                self.evaluate_incremental(narrative, supplement)
            }
            Some(serde_json::Value::Null) | None => self.evaluate(narrative),
            Some(other) => Err(EngineError::InvalidInput(format!(
                "supplement must be a string, got {}",
                json_type(other)
            ))),
        }
    }

    fn run(&self, narrative: &str) -> Result<ClinicalInfoReport, EngineError> {
        let start = Instant::now();

        let detected = detect(narrative, &self.taxonomy);
        let patient = extract_patient_context(&normalize(narrative));
        let history = history_gaps(&patient, &detected);
        let completeness = evaluate(&detected);
        let assignment = prioritize(&completeness, &self.taxonomy, &self.config.thresholds);
        let questions = generate_questions(&assignment, &history, self.config.language);
        let red_flags = detect_red_flags(
            narrative,
            &self.taxonomy,
            self.config.min_corroborating_phrases,
        );

        let report = compose(ReportParts {
            suggestions: suggest(&detected),
            considerations: clinical_considerations(&detected, &self.taxonomy),
            patient,
            history,
            detected,
            completeness,
            assignment,
            questions,
            red_flags,
        })?;

        let processing_time_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            patterns = report.detected_patterns().len(),
            red_flags = report.red_flags().len(),
            questions = report.questions().total(),
            history_gaps = report.missing_history().len(),
            completeness = ?report.overall_completeness_percent(),
            processing_ms = processing_time_ms,
            "Clinical narrative evaluated"
        );

        Ok(report)
    }
}

impl Default for DefaultClinicalInfoEngine {
    fn default() -> Self {
        Self::with_builtin_taxonomy()
    }
}

impl ClinicalInfoEngine for DefaultClinicalInfoEngine {
    fn evaluate(&self, narrative: &str) -> Result<ClinicalInfoReport, EngineError> {
        self.run(narrative)
    }

    fn evaluate_incremental(
        &self,
        base: &str,
        supplement: &str,
    ) -> Result<ClinicalInfoReport, EngineError> {
        self.run(&format!("{base} {supplement}"))
    }
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::PriorityThresholds;
    use crate::models::{AttributeKind, BodySystem, HistoryItem, Language, MedicationStatus};

    const LUMBAR_NARRATIVE: &str = "Paciente de 56 años con dolor lumbar de 3 días, \
        empeora al agacharse, mejora con reposo, hormigueo en pierna derecha.";
    const HEADACHE_NARRATIVE: &str =
        "Peor dolor de cabeza de su vida, inicio súbito, rigidez nucal, fiebre";

    fn engine() -> DefaultClinicalInfoEngine {
        DefaultClinicalInfoEngine::default()
    }

    #[test]
    fn lumbar_scenario() {
        let report = engine().evaluate(LUMBAR_NARRATIVE).unwrap();

        let lumbar = report.completeness_for("dolor lumbar").unwrap();
        assert_eq!(lumbar.pattern.system, BodySystem::Musculoskeletal);
        assert_eq!(
            lumbar.detected_attributes,
            vec![AttributeKind::Duration, AttributeKind::ModifyingFactors]
        );
        assert_eq!(
            lumbar.missing_attributes,
            vec![AttributeKind::Intensity, AttributeKind::Location, AttributeKind::Progression]
        );
        assert_eq!(lumbar.completeness_percent, 40);

        assert!(report.detected_patterns().iter().any(|d| d.name() == "parestesias"));
        assert!(report
            .questions()
            .high
            .contains(&"On a scale of 1–10, how intense is the dolor lumbar?".to_string()));
        assert!(!report.has_red_flags());
        assert!(report
            .suggested_exam()
            .iter()
            .any(|step| step.contains("Straight leg raise")));
        assert_eq!(report.patient().age_years, Some(56));
    }

    #[test]
    fn headache_scenario_raises_neurological_flag() {
        let report = engine().evaluate(HEADACHE_NARRATIVE).unwrap();

        let neuro = report
            .red_flags()
            .iter()
            .find(|a| a.system == BodySystem::Neurological)
            .expect("neurological red flag");
        assert!(neuro.matched_phrases.len() >= 2);
        assert!(neuro.recommended_action.contains("emergency"));
        assert!(neuro.recommended_action.contains("head CT"));
        assert!(report.detected_patterns().iter().any(|d| d.name() == "cefalea"));
        assert!(!report.watch_for().is_empty());
    }

    #[test]
    fn empty_narrative_gives_generic_report() {
        let report = engine().evaluate("").unwrap();
        assert!(report.detected_patterns().is_empty());
        assert!(report.questions().is_empty());
        assert!(!report.has_red_flags());
        assert_eq!(report.suggested_exam().len(), 3);
        assert_eq!(report.overall_completeness_percent(), None);
    }

    #[test]
    fn incremental_matches_joined_narrative() {
        let engine = engine();
        let base = "dolor lumbar de 3 días";
        let supplement = "intensidad 8/10, empeora al sentarse";

        let incremental = engine.evaluate_incremental(base, supplement).unwrap();
        let joined = engine.evaluate(&format!("{base} {supplement}")).unwrap();
        assert_eq!(incremental, joined);
        assert_eq!(incremental, engine.evaluate_incremental(base, supplement).unwrap());
    }

    #[test]
    fn appended_information_never_lowers_completeness() {
        let engine = engine();
        let steps = [
            "Paciente con dolor lumbar",
            "de 3 días de evolución",
            "empeora al agacharse",
            "intensidad 7/10, paravertebral derecho",
            "cada vez más intenso",
        ];

        let mut narrative = String::new();
        let mut previous = 0u8;
        for step in steps {
            narrative = if narrative.is_empty() {
                step.to_string()
            } else {
                format!("{narrative} {step}")
            };
            let report = engine.evaluate(&narrative).unwrap();
            let current = report.completeness_for("dolor lumbar").unwrap().completeness_percent;
            assert!(current >= previous, "{current} < {previous} after '{step}'");
            previous = current;
        }
        assert_eq!(previous, 100);
    }

    #[test]
    fn trailing_age_words_keep_an_earlier_duration() {
        let engine = engine();
        for (base, pattern) in [
            ("dolor lumbar 40 años", "dolor lumbar"),
            ("dolor lumbar de 5 años", "dolor lumbar"),
            ("cefalea 2 años", "cefalea"),
        ] {
            let before = engine.evaluate(base).unwrap();
            let after = engine.evaluate_incremental(base, "de edad").unwrap();
            let before = before.completeness_for(pattern).unwrap();
            let after = after.completeness_for(pattern).unwrap();
            assert!(before.detected_attributes.contains(&AttributeKind::Duration), "{base}");
            assert!(
                after.completeness_percent >= before.completeness_percent,
                "{base}: {} < {}",
                after.completeness_percent,
                before.completeness_percent
            );
        }
    }

    #[test]
    fn vague_history_adds_checklist_questions() {
        let report = engine()
            .evaluate("Paciente con cefalea. Toma medicamentos.")
            .unwrap();

        assert_eq!(report.patient().medications, MedicationStatus::Unspecified);
        let items: Vec<HistoryItem> = report.missing_history().iter().map(|g| g.item).collect();
        assert_eq!(items, vec![HistoryItem::Age, HistoryItem::Sex, HistoryItem::Medications]);

        let questions = report.questions();
        assert_eq!(questions.high[0], "How old is the patient?");
        assert!(questions.medium.contains(
            &"Which medications is the patient currently taking, at what dose and how often?".to_string()
        ));
        assert!(questions.low.contains(&"What is the patient's sex?".to_string()));
    }

    #[test]
    fn stated_history_adds_no_checklist_questions() {
        let report = engine()
            .evaluate("Mujer de 35 años con cefalea, toma paracetamol 500 mg")
            .unwrap();
        assert!(report.missing_history().is_empty());
        assert!(report
            .questions()
            .top(usize::MAX)
            .iter()
            .all(|q| !q.contains("patient")));
    }

    #[test]
    fn request_requires_string_narrative() {
        let engine = engine();
        for request in [
            json!({}),
            json!({"narrative": null}),
            json!({"narrative": 42}),
            json!({"narrative": ["dolor"]}),
            json!("dolor lumbar"),
        ] {
            let err = engine.evaluate_request(&request).unwrap_err();
            assert!(matches!(err, EngineError::InvalidInput(_)), "{request}");
        }
    }

    #[test]
    fn request_rejects_non_string_supplement() {
        let err = engine()
            .evaluate_request(&json!({"narrative": "tos seca", "supplement": 3}))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(msg) if msg.contains("supplement")));
    }

    #[test]
    fn request_with_supplement_is_incremental() {
        let engine = engine();
        let from_request = engine
            .evaluate_request(&json!({"narrative": "tos seca", "supplement": "desde hace dos semanas"}))
            .unwrap();
        let direct = engine
            .evaluate_incremental("tos seca", "desde hace dos semanas")
            .unwrap();
        assert_eq!(from_request, direct);

        let null_supplement = engine
            .evaluate_request(&json!({"narrative": "tos seca", "supplement": null}))
            .unwrap();
        assert_eq!(null_supplement, engine.evaluate("tos seca").unwrap());
    }

    #[test]
    fn spanish_configuration_renders_spanish_questions() {
        let config = EngineConfig {
            language: Language::Es,
            ..EngineConfig::default()
        };
        let engine = DefaultClinicalInfoEngine::new(Arc::new(Taxonomy::builtin()), config).unwrap();
        let report = engine.evaluate(LUMBAR_NARRATIVE).unwrap();
        assert!(report
            .questions()
            .high
            .contains(&"En una escala del 1 al 10, ¿qué intensidad tiene el cuadro de dolor lumbar?".to_string()));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = EngineConfig {
            thresholds: PriorityThresholds {
                urgent_below: 80,
                partial_below: 70,
            },
            ..EngineConfig::default()
        };
        let err = DefaultClinicalInfoEngine::new(Arc::new(Taxonomy::builtin()), config).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DefaultClinicalInfoEngine>();

        let engine = Arc::new(engine());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || engine.evaluate(LUMBAR_NARRATIVE).unwrap())
            })
            .collect();
        let reports: Vec<ClinicalInfoReport> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(reports.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn trait_object_usage() {
        let engine: Box<dyn ClinicalInfoEngine> = Box::new(engine());
        let report = engine.evaluate("Disnea de esfuerzo").unwrap();
        assert_eq!(report.involved_systems(), [BodySystem::Cardiopulmonary]);
    }
}
