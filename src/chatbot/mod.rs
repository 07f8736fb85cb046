// src/chatbot/mod.rs
//! Scripted intake conversation: sanitizing, validation, sentiment and the step machine

pub mod engine;
pub mod greeting;
pub mod questions;
pub mod sanitizer;
pub mod sentiment;
pub mod session;
pub mod step;
pub mod validator;

pub use engine::{should_end_conversation, Chatbot, Reply, TurnOutcome};
pub use greeting::{GreetingModel, StaticGreeting};
pub use questions::{derive_tech_questions, prompt_for};
pub use sanitizer::sanitize;
pub use sentiment::classify;
pub use session::{Session, Turn};
pub use step::Step;
pub use validator::is_valid;
