use std::collections::HashSet;

use crate::models::{Language, PriorityTier};

use super::messages::QuestionTemplates;
use super::types::{HistoryGap, PrioritizedQuestions, PriorityAssignment};

/// Render one question per open history item and per prioritized attribute.
/// Within a tier, history questions come first. A question string is kept
/// only where it first appears, scanning High, then Medium, then Low.
pub fn generate_questions(
    assignment: &PriorityAssignment,
    history: &[HistoryGap],
    lang: Language,
) -> PrioritizedQuestions {
    let mut questions = PrioritizedQuestions::default();
    let mut seen = HashSet::new();

    for tier in [PriorityTier::High, PriorityTier::Medium, PriorityTier::Low] {
        let history_questions = history
            .iter()
            .filter(|gap| gap.tier == tier)
            .map(|gap| QuestionTemplates::history_question(lang, gap.item).to_string());
        let attribute_questions = assignment
            .tier(tier)
            .iter()
            .map(|item| QuestionTemplates::question(lang, item.attribute, &item.pattern.name));

        for question in history_questions.chain(attribute_questions) {
            if seen.insert(question.clone()) {
                questions.tier_mut(tier).push(question);
            }
        }
    }

    questions
}
