// src/chatbot/step.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// One stage of the intake sequence. Order is fixed and never revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Name,
    Email,
    Phone,
    Experience,
    Position,
    Location,
    TechStack,
    TechQuestions,
}

impl Step {
    pub const SEQUENCE: [Step; 8] = [
        Step::Name,
        Step::Email,
        Step::Phone,
        Step::Experience,
        Step::Position,
        Step::Location,
        Step::TechStack,
        Step::TechQuestions,
    ];

    /// Next step in the sequence; `TechQuestions` is the last one and stays put.
    pub fn next(self) -> Step {
        match self {
            Step::Name => Step::Email,
            Step::Email => Step::Phone,
            Step::Phone => Step::Experience,
            Step::Experience => Step::Position,
            Step::Position => Step::Location,
            Step::Location => Step::TechStack,
            Step::TechStack => Step::TechQuestions,
            Step::TechQuestions => Step::TechQuestions,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Name => "name",
            Step::Email => "email",
            Step::Phone => "phone",
            Step::Experience => "experience",
            Step::Position => "position",
            Step::Location => "location",
            Step::TechStack => "tech_stack",
            Step::TechQuestions => "tech_questions",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
