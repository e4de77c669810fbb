//! Text preparation and phrase matching shared by the detectors.
//!
//! Narratives and taxonomy phrases go through the same [`normalize`] step, so
//! matching is case- and accent-insensitive. Normalization maps one input
//! character to one output character (invisible and control characters are
//! dropped), which keeps offsets meaningful for source spans.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{MedicationStatus, Sex};

use super::types::PatientContext;

/// Numeric or spelled-out durations: "3 días", "hace 6 horas", "dos semanas".
static RE_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:\d+(?:[.,]\d+)?|un|una|dos|tres|cuatro|cinco|seis|siete|ocho|nueve|diez|unos|unas|varios|varias)\s*(?:minutos?|horas?|dias?|semanas?|mes|meses|anos?)\b",
    )
    .unwrap()
});

/// Numeric intensity ratings: "7/10", "8 de 10", "6 sobre 10".
static RE_INTENSITY_SCALE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,2}\s*(?:/|de|sobre)\s*10\b").unwrap());

/// "paciente de 56 años", "mujer 35 años", "femenina de 35 años".
static RE_AGE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:paciente|mujer|hombre|varon|nino|nina|femenina|femenino|masculino|senora|senor)\s+(?:de\s+)?(\d{1,3})\s*anos\b",
    )
    .unwrap()
});

/// "56 años de edad".
static RE_AGE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,3})\s*anos\s+de\s+edad\b").unwrap());

/// Stated doses: "500 mg", "20 gotas", "1 comprimido".
static RE_DOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b\d+(?:[.,]\d+)?\s*(?:mg|mcg|g|ml|ui|gotas|comprimidos?|tabletas?|capsulas?)\b",
    )
    .unwrap()
});

const FEMALE_CUES: &[&str] = &["mujer", "femenina", "femenino", "senora", "paciente gestante"];
const MALE_CUES: &[&str] = &["hombre", "varon", "masculino"];

const MEDICATION_CUES: &[&str] = &[
    "medicament",
    "medicacion",
    "farmaco",
    "tratamiento con",
    "en tratamiento",
    "analgesic",
    "antiinflamatori",
    "antihipertensiv",
    "anticonceptiv",
];
const MEDICATION_DENIAL_CUES: &[&str] = &[
    "niega medicament",
    "niega tomar",
    "niega tratamiento",
    "no toma medicament",
    "no toma ningun",
    "sin medicacion",
    "sin medicamentos",
    "sin tratamiento",
];

/// Prepare text for matching: drop invisible and control characters, map
/// whitespace to a plain space, lowercase and fold Spanish diacritics.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_invisible(c) {
            continue;
        }
        if c.is_whitespace() {
            out.push(' ');
            continue;
        }
        if c.is_control() {
            continue;
        }
        for lower in c.to_lowercase() {
            out.push(fold_diacritic(lower));
        }
    }
    out
}

fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{2069}'
            | '\u{FEFF}'
            | '\u{00AD}'
            | '\u{034F}'
    )
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// Byte offset of the first occurrence of `phrase` in `normalized` that starts
/// at a word boundary. The phrase is normalized here; the haystack must
/// already be normalized. A phrase may end mid-word, so stems such as
/// "intens" match "intensidad".
pub fn find_phrase(normalized: &str, phrase: &str) -> Option<usize> {
    let needle = normalize(phrase);
    let needle = needle.trim();
    if needle.is_empty() {
        return None;
    }
    normalized
        .match_indices(needle)
        .map(|(idx, _)| idx)
        .find(|&idx| {
            normalized[..idx]
                .chars()
                .next_back()
                .map_or(true, |prev| !prev.is_alphanumeric())
        })
}

pub fn contains_phrase(normalized: &str, phrase: &str) -> bool {
    find_phrase(normalized, phrase).is_some()
}

/// Convert a byte offset of `text` into a char offset.
pub fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

/// Replace age statements introduced by a subject ("paciente de 56 años")
/// with spaces so they are not read as durations. Byte length is preserved.
///
/// Only the subject-first form is masked: "40 años de edad" still counts as a
/// duration, so appended words never remove one already found.
pub fn mask_age_mentions(normalized: &str) -> String {
    let mut masked = normalized.to_string();
    let spans: Vec<(usize, usize)> = RE_AGE_PREFIX
        .find_iter(normalized)
        .map(|m| (m.start(), m.end()))
        .collect();
    for (start, end) in spans {
        masked.replace_range(start..end, &" ".repeat(end - start));
    }
    masked
}

/// Whether the narrative states how long something has been going on.
pub fn has_duration_mention(normalized: &str) -> bool {
    RE_DURATION.is_match(&mask_age_mentions(normalized))
}

/// Whether the narrative rates intensity on a ten-point scale.
pub fn has_intensity_rating(normalized: &str) -> bool {
    RE_INTENSITY_SCALE.is_match(normalized)
}

/// Pull the patient's age, sex and medication status out of the narrative.
pub fn extract_patient_context(normalized: &str) -> PatientContext {
    let age_years = [&*RE_AGE_PREFIX, &*RE_AGE_SUFFIX]
        .iter()
        .filter_map(|re| re.captures(normalized))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .find(|age| *age <= 130);

    let female = FEMALE_CUES.iter().any(|c| contains_phrase(normalized, c));
    let male = MALE_CUES.iter().any(|c| contains_phrase(normalized, c));
    let sex = match (female, male) {
        (true, false) => Some(Sex::Female),
        (false, true) => Some(Sex::Male),
        _ => None,
    };

    PatientContext {
        age_years,
        sex,
        medications: medication_status(normalized),
    }
}

/// A stated dose outranks a denial elsewhere in the text.
fn medication_status(normalized: &str) -> MedicationStatus {
    if RE_DOSE.is_match(normalized) {
        MedicationStatus::Detailed
    } else if MEDICATION_DENIAL_CUES.iter().any(|c| contains_phrase(normalized, c)) {
        MedicationStatus::Denied
    } else if MEDICATION_CUES.iter().any(|c| contains_phrase(normalized, c)) {
        MedicationStatus::Unspecified
    } else {
        MedicationStatus::NotMentioned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_case_and_accents() {
        assert_eq!(normalize("Inicio SÚBITO, Náuseas"), "inicio subito, nauseas");
        assert_eq!(normalize("Niño de 3 años"), "nino de 3 anos");
    }

    #[test]
    fn normalize_strips_invisible_and_maps_whitespace() {
        assert_eq!(normalize("dolor\u{200B}\nlumbar"), "dolor lumbar");
        assert_eq!(normalize("tos\tseca\x07"), "tos seca");
    }

    #[test]
    fn phrase_must_start_at_word_boundary() {
        let text = normalize("Sin datos relevantes");
        assert!(!contains_phrase(&text, "tos"));
        let text = normalize("Refiere tos seca");
        assert!(contains_phrase(&text, "tos"));
    }

    #[test]
    fn phrase_may_end_mid_word() {
        let text = normalize("intensidad 7/10");
        assert!(contains_phrase(&text, "intens"));
    }

    #[test]
    fn phrase_matching_ignores_accents_on_both_sides() {
        let text = normalize("inicio subito");
        assert!(contains_phrase(&text, "inicio súbito"));
        let text = normalize("dolor torácico");
        assert!(contains_phrase(&text, "dolor toracico"));
    }

    #[test]
    fn empty_phrase_never_matches() {
        assert!(!contains_phrase("cualquier texto", ""));
        assert!(!contains_phrase("cualquier texto", "   "));
    }

    #[test]
    fn find_phrase_reports_first_bounded_offset() {
        let text = normalize("datos: tos");
        assert_eq!(find_phrase(&text, "tos"), Some(7));
    }

    #[test]
    fn duration_mentions_detected() {
        assert!(has_duration_mention(&normalize("dolor lumbar de 3 días")));
        assert!(has_duration_mention(&normalize("inicio hace 6 horas")));
        assert!(has_duration_mention(&normalize("desde hace dos semanas")));
        assert!(!has_duration_mention(&normalize("dolor lumbar intenso")));
    }

    #[test]
    fn age_is_not_a_duration() {
        assert!(!has_duration_mention(&normalize("Paciente de 56 años con dolor lumbar")));
        assert!(!has_duration_mention(&normalize("Mujer 35 años, cefalea")));
        assert!(has_duration_mention(&normalize("Paciente de 56 años, dolor de 2 años")));
    }

    #[test]
    fn trailing_age_words_keep_a_duration() {
        let base = normalize("dolor lumbar 40 años");
        let extended = normalize("dolor lumbar 40 años de edad");
        assert!(has_duration_mention(&base));
        assert!(has_duration_mention(&extended));
        assert_eq!(mask_age_mentions(&extended), extended);
    }

    #[test]
    fn intensity_ratings_detected() {
        assert!(has_intensity_rating(&normalize("dolor 7/10")));
        assert!(has_intensity_rating(&normalize("intensidad 8 de 10")));
        assert!(!has_intensity_rating(&normalize("desde hace 10 dias")));
    }

    #[test]
    fn patient_context_extracted() {
        let ctx = extract_patient_context(&normalize("Paciente femenina de 35 años con cefalea"));
        assert_eq!(ctx.age_years, Some(35));
        assert_eq!(ctx.sex, Some(Sex::Female));

        let ctx = extract_patient_context(&normalize("Varón, 62 años de edad"));
        assert_eq!(ctx.age_years, Some(62));
        assert_eq!(ctx.sex, Some(Sex::Male));
    }

    #[test]
    fn medication_status_from_narrative() {
        let status = |text: &str| extract_patient_context(&normalize(text)).medications;
        assert_eq!(status("Paciente con cefalea. Toma medicamentos."), MedicationStatus::Unspecified);
        assert_eq!(status("En tratamiento con antihipertensivos"), MedicationStatus::Unspecified);
        assert_eq!(status("Toma ibuprofeno 400 mg cada 8 horas"), MedicationStatus::Detailed);
        assert_eq!(status("Niega medicamentos habituales"), MedicationStatus::Denied);
        assert_eq!(status("Sin tratamiento previo"), MedicationStatus::Denied);
        assert_eq!(status("Refiere tos seca"), MedicationStatus::NotMentioned);
    }

    #[test]
    fn patient_context_empty_when_not_stated() {
        let ctx = extract_patient_context(&normalize("Refiere tos seca"));
        assert_eq!(ctx, PatientContext::default());
    }
}
