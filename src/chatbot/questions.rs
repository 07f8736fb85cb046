// src/chatbot/questions.rs
use super::step::Step;

const MAX_TECHNOLOGIES: usize = 3;
const MAX_QUESTIONS: usize = 5;

const GENERAL_QUESTIONS: [&str; 2] = [
    "How do you approach learning new technologies?",
    "How do you ensure code quality in your projects?",
];

pub const GREETING: &str = "Hello! I'm the TalentScout Hiring Assistant. I'll be helping with your initial screening process. \nCould you please tell me your full name to get started?";

pub const FAREWELL: &str = "Thank you for your time. The conversation has ended. Have a great day!";

pub const TECH_CLOSING: &str = "Thank you for answering all the technical questions. Your responses have been recorded. The TalentScout team will review your application and get back to you soon. Is there anything else you'd like to mention?";

/// Prompt shown when asking for a step. `TechQuestions` has no generic prompt.
pub fn prompt_for(step: Step) -> &'static str {
    match step {
        Step::Name => "Could you please tell me your full name?",
        Step::Email => "What's your email address?",
        Step::Phone => "What's your phone number?",
        Step::Experience => "How many years of experience do you have in your field?",
        Step::Position => "What position(s) are you interested in?",
        Step::Location => "What's your current location?",
        Step::TechStack => {
            "Please list your tech stack (programming languages, frameworks, databases, tools), separated by commas:"
        }
        Step::TechQuestions => "",
    }
}

fn questions_for(tech: &str) -> [String; 3] {
    [
        format!("What are the main features and benefits of {}?", tech),
        format!(
            "Can you describe a challenging problem you solved using {}?",
            tech
        ),
        format!("What are some best practices when working with {}?", tech),
    ]
}

/// Build the technical question set: three per technology for the first three
/// technologies, then the general questions, capped at five.
///
/// `_experience` is accepted for callers but does not shape the questions.
pub fn derive_tech_questions(tech_stack: &[String], _experience: &str) -> Vec<String> {
    tech_stack
        .iter()
        .take(MAX_TECHNOLOGIES)
        .flat_map(|tech| questions_for(tech))
        .chain(GENERAL_QUESTIONS.iter().map(|q| q.to_string()))
        .take(MAX_QUESTIONS)
        .collect()
}
