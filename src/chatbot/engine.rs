// src/chatbot/engine.rs
//! Step machine and response orchestration for one conversation.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::greeting::GreetingModel;
use super::questions::{derive_tech_questions, prompt_for, FAREWELL, TECH_CLOSING};
use super::step::Step;
use super::validator::is_valid;
use crate::types::{CandidateRecord, Message, Role};

const EXIT_KEYWORDS: [&str; 5] = ["exit", "quit", "stop", "bye", "goodbye"];

/// Case-insensitive substring match, so "goodbye" and "Stopford" both end the conversation.
pub fn should_end_conversation(input: &str) -> bool {
    let lowered = input.to_lowercase();
    EXIT_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    Greeting,
    Accepted,
    Rejected,
    TechQuestion,
    Completed,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message: String,
    pub outcome: TurnOutcome,
}

impl Reply {
    fn new(message: impl Into<String>, outcome: TurnOutcome) -> Self {
        Self {
            message: message.into(),
            outcome,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    NotStarted,
    Active,
    Ended,
}

/// Technical question set, built once per conversation
#[derive(Debug, Clone, Default)]
struct TechQuestionProgress {
    questions: Option<Vec<String>>,
    index: usize,
}

pub struct Chatbot {
    greeting_model: Arc<dyn GreetingModel>,
    phase: Phase,
    step: Step,
    tech: TechQuestionProgress,
}

impl Chatbot {
    pub fn new(greeting_model: Arc<dyn GreetingModel>) -> Self {
        Self {
            greeting_model,
            phase: Phase::NotStarted,
            step: Step::Name,
            tech: TechQuestionProgress::default(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Cached technical questions, if they have been generated
    pub fn tech_questions(&self) -> Option<&[String]> {
        self.tech.questions.as_deref()
    }

    /// Produce the assistant message for the latest user turn
    pub fn get_response(&mut self, messages: &[Message], record: &mut CandidateRecord) -> String {
        self.respond(messages, record).message
    }

    pub fn respond(&mut self, messages: &[Message], record: &mut CandidateRecord) -> Reply {
        match self.phase {
            Phase::NotStarted => {
                self.phase = Phase::Active;
                return Reply::new(self.greeting_model.greeting(), TurnOutcome::Greeting);
            }
            Phase::Ended => return Reply::new(FAREWELL, TurnOutcome::Ended),
            Phase::Active => {}
        }

        let last_message = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or("");

        if should_end_conversation(last_message) {
            info!("Conversation ended by candidate at step {}", self.step);
            self.phase = Phase::Ended;
            return Reply::new(FAREWELL, TurnOutcome::Ended);
        }

        if self.step == Step::TechQuestions {
            return self.handle_tech_questions(record);
        }

        if !is_valid(self.step, last_message) {
            debug!("Rejected answer for step {}", self.step);
            return Reply::new(
                format!(
                    "I'm sorry, but I need a valid {}. {}",
                    self.step,
                    prompt_for(self.step)
                ),
                TurnOutcome::Rejected,
            );
        }

        update_candidate_info(self.step, last_message, record);
        self.step = self.step.next();
        debug!("Advanced to step {}", self.step);

        if self.step == Step::TechQuestions {
            return self.handle_tech_questions(record);
        }

        Reply::new(
            format!("Thank you. {}", prompt_for(self.step)),
            TurnOutcome::Accepted,
        )
    }

    fn handle_tech_questions(&mut self, record: &mut CandidateRecord) -> Reply {
        let Some(questions) = &self.tech.questions else {
            let questions = derive_tech_questions(&record.tech_stack, &record.experience);
            info!(
                "Generated {} technical questions for {} technologies",
                questions.len(),
                record.tech_stack.len()
            );
            let first = questions.first().cloned().unwrap_or_default();
            self.tech.questions = Some(questions);
            self.tech.index = 0;

            return Reply::new(
                format!(
                    "Great! Based on your tech stack ({}), I'd like to ask you a few technical questions.\n\nQuestion 1: {}",
                    record.tech_stack.join(", "),
                    first
                ),
                TurnOutcome::TechQuestion,
            );
        };

        self.tech.index += 1;

        match questions.get(self.tech.index) {
            Some(question) => Reply::new(
                format!(
                    "Thank you for your answer.\n\nQuestion {}: {}",
                    self.tech.index + 1,
                    question
                ),
                TurnOutcome::TechQuestion,
            ),
            None => {
                record.tech_questions_asked = true;
                Reply::new(TECH_CLOSING, TurnOutcome::Completed)
            }
        }
    }
}

/// Write an accepted answer into the record field for `step`.
/// The tech stack is split on commas and trimmed, keeping order and duplicates.
fn update_candidate_info(step: Step, input: &str, record: &mut CandidateRecord) {
    match step {
        Step::Name => record.name = input.to_string(),
        Step::Email => record.email = input.to_string(),
        Step::Phone => record.phone = input.to_string(),
        Step::Experience => record.experience = input.to_string(),
        Step::Position => record.position = input.to_string(),
        Step::Location => record.location = input.to_string(),
        Step::TechStack => {
            record.tech_stack = input.split(',').map(|tech| tech.trim().to_string()).collect()
        }
        Step::TechQuestions => {}
    }
}
