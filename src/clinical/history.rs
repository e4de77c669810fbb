//! Clinical-history checklist.
//!
//! Alongside the symptom attributes, a consultation needs the patient's age,
//! sex and, when medication use is mentioned, which drugs at what dose. The
//! checklist only applies once the narrative describes a presentation.

use crate::models::{HistoryItem, MedicationStatus, PriorityTier};

use super::types::{DetectedPattern, HistoryGap, PatientContext};

const CHECKLIST: [HistoryItem; 3] = [HistoryItem::Age, HistoryItem::Sex, HistoryItem::Medications];

/// Tier a history question is asked in.
pub fn history_tier(item: HistoryItem) -> PriorityTier {
    match item {
        HistoryItem::Age => PriorityTier::High,
        HistoryItem::Medications => PriorityTier::Medium,
        HistoryItem::Sex => PriorityTier::Low,
    }
}

/// History items the narrative leaves open, in checklist order.
/// Empty when no pattern was detected.
pub fn history_gaps(patient: &PatientContext, detected: &[DetectedPattern]) -> Vec<HistoryGap> {
    if detected.is_empty() {
        return Vec::new();
    }

    CHECKLIST
        .into_iter()
        .filter(|item| is_open(patient, *item))
        .map(|item| HistoryGap {
            item,
            tier: history_tier(item),
        })
        .collect()
}

/// Whether a history item is still open for this patient.
pub fn is_open(patient: &PatientContext, item: HistoryItem) -> bool {
    match item {
        HistoryItem::Age => patient.age_years.is_none(),
        HistoryItem::Sex => patient.sex.is_none(),
        HistoryItem::Medications => patient.medications == MedicationStatus::Unspecified,
    }
}
