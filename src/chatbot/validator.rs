// src/chatbot/validator.rs
//! Acceptance check for a step answer during the conversation.
//!
//! These checks are deliberately loose. The strict checks in `crate::utils`
//! (`validate_email`, `validate_phone`) serve the summary and storage path and
//! never block a step.

use super::step::Step;
use crate::utils::digit_count;

pub fn is_valid(step: Step, text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }

    match step {
        Step::Email => text.contains('@') && text.contains('.'),
        Step::Phone => digit_count(text) >= 10,
        Step::Experience => text.chars().any(|c| c.is_ascii_digit()),
        Step::Name | Step::Position | Step::Location | Step::TechStack | Step::TechQuestions => {
            true
        }
    }
}
