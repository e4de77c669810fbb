use crate::models::{AttributeKind, HistoryItem, Language};

/// Follow-up question templates. Wording is neutral and never suggests a
/// diagnosis; the pattern name is inserted as written in the taxonomy.
pub struct QuestionTemplates;

impl QuestionTemplates {
    /// Question asking for one missing attribute of a pattern.
    pub fn question(lang: Language, attribute: AttributeKind, pattern: &str) -> String {
        match lang {
            Language::En => Self::english(attribute, pattern),
            Language::Es => Self::spanish(attribute, pattern),
        }
    }

    /// Question asking for an open clinical-history item.
    pub fn history_question(lang: Language, item: HistoryItem) -> &'static str {
        match (lang, item) {
            (Language::En, HistoryItem::Age) => "How old is the patient?",
            (Language::En, HistoryItem::Sex) => "What is the patient's sex?",
            (Language::En, HistoryItem::Medications) => {
                "Which medications is the patient currently taking, at what dose and how often?"
            }

            (Language::Es, HistoryItem::Age) => "¿Qué edad tiene el paciente?",
            (Language::Es, HistoryItem::Sex) => "¿Cuál es el sexo del paciente?",
            (Language::Es, HistoryItem::Medications) => {
                "¿Qué medicamentos está tomando actualmente, en qué dosis y con qué frecuencia?"
            }
        }
    }

    /// Short description of an attribute, used by the fallback template.
    pub fn attribute_label(lang: Language, attribute: AttributeKind) -> &'static str {
        match (lang, attribute) {
            (Language::En, AttributeKind::Intensity) => "its intensity",
            (Language::En, AttributeKind::Duration) => "how long it has lasted",
            (Language::En, AttributeKind::Location) => "where it is located",
            (Language::En, AttributeKind::ModifyingFactors) => "what makes it better or worse",
            (Language::En, AttributeKind::Progression) => "how it has evolved",
            (Language::En, AttributeKind::Frequency) => "how often it occurs",
            (Language::En, AttributeKind::Quality) => "what it feels like",
            (Language::En, AttributeKind::Radiation) => "whether it spreads",
            (Language::En, AttributeKind::Onset) => "how it started",
            (Language::En, AttributeKind::Triggers) => "what triggers it",
            (Language::En, AttributeKind::AssociatedSymptoms) => "any accompanying symptoms",

            (Language::Es, AttributeKind::Intensity) => "su intensidad",
            (Language::Es, AttributeKind::Duration) => "su duración",
            (Language::Es, AttributeKind::Location) => "su localización",
            (Language::Es, AttributeKind::ModifyingFactors) => "los factores que lo modifican",
            (Language::Es, AttributeKind::Progression) => "su evolución",
            (Language::Es, AttributeKind::Frequency) => "su frecuencia",
            (Language::Es, AttributeKind::Quality) => "sus características",
            (Language::Es, AttributeKind::Radiation) => "si se irradia",
            (Language::Es, AttributeKind::Onset) => "su forma de inicio",
            (Language::Es, AttributeKind::Triggers) => "sus desencadenantes",
            (Language::Es, AttributeKind::AssociatedSymptoms) => "los síntomas que lo acompañan",
        }
    }

    fn english(attribute: AttributeKind, p: &str) -> String {
        match attribute {
            AttributeKind::Intensity => format!("On a scale of 1–10, how intense is the {p}?"),
            AttributeKind::Duration => format!("How long has the {p} been present?"),
            AttributeKind::Location => format!("Where exactly is the {p} located?"),
            AttributeKind::ModifyingFactors => {
                format!("Does anything make the {p} better or worse?")
            }
            AttributeKind::Progression => format!("How has the {p} evolved since it began?"),
            AttributeKind::Radiation => {
                format!("Does the {p} radiate or spread to any other area?")
            }
            AttributeKind::Frequency => format!("How often does the {p} occur?"),
            AttributeKind::Triggers => {
                format!("Have you identified anything that triggers the {p}?")
            }
            other => format!(
                "Regarding the {p}, can you describe {}?",
                Self::attribute_label(Language::En, other),
            ),
        }
    }

    fn spanish(attribute: AttributeKind, p: &str) -> String {
        match attribute {
            AttributeKind::Intensity => {
                format!("En una escala del 1 al 10, ¿qué intensidad tiene el cuadro de {p}?")
            }
            AttributeKind::Duration => format!("¿Cuánto tiempo lleva con {p}?"),
            AttributeKind::Location => format!("¿Podría señalar exactamente dónde nota {p}?"),
            AttributeKind::ModifyingFactors => {
                format!("¿Hay algo que alivie o empeore el cuadro de {p}?")
            }
            AttributeKind::Progression => {
                format!("¿Cómo ha evolucionado el cuadro de {p} desde que comenzó?")
            }
            AttributeKind::Radiation => {
                format!("¿El cuadro de {p} se irradia o se extiende hacia alguna otra zona?")
            }
            AttributeKind::Frequency => format!("¿Con qué frecuencia presenta {p}?"),
            AttributeKind::Triggers => {
                format!("¿Ha identificado algún factor que desencadene el cuadro de {p}?")
            }
            other => format!(
                "Respecto al cuadro de {p}, ¿podría brindar información sobre {}?",
                Self::attribute_label(Language::Es, other),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [AttributeKind; 11] = [
        AttributeKind::Intensity,
        AttributeKind::Duration,
        AttributeKind::Location,
        AttributeKind::ModifyingFactors,
        AttributeKind::Progression,
        AttributeKind::Frequency,
        AttributeKind::Quality,
        AttributeKind::Radiation,
        AttributeKind::Onset,
        AttributeKind::Triggers,
        AttributeKind::AssociatedSymptoms,
    ];

    #[test]
    fn intensity_question_names_scale_and_pattern() {
        let q = QuestionTemplates::question(Language::En, AttributeKind::Intensity, "dolor lumbar");
        assert_eq!(q, "On a scale of 1–10, how intense is the dolor lumbar?");
    }

    #[test]
    fn uncovered_attribute_uses_fallback() {
        let q = QuestionTemplates::question(Language::En, AttributeKind::Quality, "cefalea");
        assert_eq!(q, "Regarding the cefalea, can you describe what it feels like?");
    }

    #[test]
    fn spanish_templates() {
        let q = QuestionTemplates::question(Language::Es, AttributeKind::Duration, "náuseas");
        assert_eq!(q, "¿Cuánto tiempo lleva con náuseas?");
        let q = QuestionTemplates::question(Language::Es, AttributeKind::Onset, "mareo");
        assert!(q.starts_with("Respecto al cuadro de mareo"));
        assert!(q.contains("su forma de inicio"));
    }

    #[test]
    fn every_kind_renders_in_every_language() {
        for lang in [Language::En, Language::Es] {
            for kind in ALL_KINDS {
                let q = QuestionTemplates::question(lang, kind, "tos");
                assert!(q.contains("tos"), "{lang} {kind}: {q}");
                assert!(q.ends_with('?'));
            }
        }
    }

    #[test]
    fn history_questions_in_both_languages() {
        assert_eq!(
            QuestionTemplates::history_question(Language::En, HistoryItem::Age),
            "How old is the patient?"
        );
        assert_eq!(
            QuestionTemplates::history_question(Language::Es, HistoryItem::Age),
            "¿Qué edad tiene el paciente?"
        );
        let meds = QuestionTemplates::history_question(Language::Es, HistoryItem::Medications);
        assert!(meds.contains("dosis"));
        assert!(meds.contains("frecuencia"));
    }

    #[test]
    fn distinct_attributes_give_distinct_questions() {
        let mut seen = std::collections::HashSet::new();
        for kind in ALL_KINDS {
            assert!(seen.insert(QuestionTemplates::question(Language::En, kind, "tos")));
        }
    }
}
