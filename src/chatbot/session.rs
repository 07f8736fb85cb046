// src/chatbot/session.rs
use std::sync::Arc;
use tracing::debug;

use super::engine::{Chatbot, Reply};
use super::greeting::GreetingModel;
use super::sanitizer::sanitize;
use super::sentiment::classify;
use super::step::Step;
use crate::types::{CandidateRecord, Message, Sentiment};

/// A single candidate conversation: transcript, record and step machine.
pub struct Session {
    greeting_model: Arc<dyn GreetingModel>,
    chatbot: Chatbot,
    record: CandidateRecord,
    transcript: Vec<Message>,
}

/// Reply to a submitted message together with what was stored for it
#[derive(Debug, Clone)]
pub struct Turn {
    pub input: String,
    pub sentiment: Sentiment,
    pub reply: Reply,
}

impl Session {
    pub fn new(greeting_model: Arc<dyn GreetingModel>) -> Self {
        Self {
            chatbot: Chatbot::new(greeting_model.clone()),
            greeting_model,
            record: CandidateRecord::new(),
            transcript: Vec::new(),
        }
    }

    /// Open the conversation with the greeting
    pub fn start(&mut self) -> Reply {
        let reply = self.chatbot.respond(&self.transcript, &mut self.record);
        self.transcript.push(Message::assistant(reply.message.clone()));
        reply
    }

    /// Sanitize, tag and record a raw user message, then answer it
    pub fn submit(&mut self, raw: &str) -> Turn {
        let input = sanitize(raw);
        let sentiment = classify(&input);
        debug!("User message tagged {}", sentiment);

        self.record.sentiment_history.push(sentiment);
        self.transcript.push(Message::user(input.clone(), sentiment));

        let reply = self.chatbot.respond(&self.transcript, &mut self.record);
        self.transcript.push(Message::assistant(reply.message.clone()));

        Turn {
            input,
            sentiment,
            reply,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.greeting_model.clone());
    }

    pub fn record(&self) -> &CandidateRecord {
        &self.record
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn step(&self) -> Step {
        self.chatbot.step()
    }

    pub fn is_ended(&self) -> bool {
        self.chatbot.is_ended()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chatbot::engine::TurnOutcome;
    use crate::chatbot::questions::GREETING;
    use crate::types::Role;

    struct FixedGreeting;

    impl GreetingModel for FixedGreeting {
        fn greeting(&self) -> String {
            GREETING.to_string()
        }
    }

    fn session() -> Session {
        Session::new(Arc::new(FixedGreeting))
    }

    #[test]
    fn test_start_then_submit() {
        let mut session = session();
        assert_eq!(session.start().outcome, TurnOutcome::Greeting);

        let turn = session.submit("<b>John Smith</b>");
        assert_eq!(turn.input, "John Smith");
        assert_eq!(turn.reply.outcome, TurnOutcome::Accepted);
        assert_eq!(session.record().name, "John Smith");
        assert_eq!(session.step(), Step::Email);

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0].role, Role::Assistant);
        assert_eq!(transcript[1].role, Role::User);
        assert_eq!(transcript[1].sentiment, Some(Sentiment::Neutral));
        assert_eq!(transcript[2].content, "Thank you. What's your email address?");
    }

    #[test]
    fn test_first_submit_without_start_is_greeted() {
        let mut session = session();
        let turn = session.submit("hello there");
        assert_eq!(turn.reply.outcome, TurnOutcome::Greeting);
        assert!(session.record().name.is_empty());
        assert_eq!(session.record().sentiment_history, vec![Sentiment::Neutral]);
    }

    #[test]
    fn test_sentiment_history_tracks_every_message() {
        let mut session = session();
        session.start();
        session.submit("John Smith");
        session.submit("this is a bad problem");
        session.submit("great");

        assert_eq!(
            session.record().sentiment_history,
            vec![Sentiment::Neutral, Sentiment::Negative, Sentiment::Positive]
        );
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut session = session();
        session.start();
        session.submit("John Smith");
        session.submit("goodbye");
        assert!(session.is_ended());

        session.reset();
        assert!(!session.is_ended());
        assert!(session.transcript().is_empty());
        assert_eq!(session.record(), &CandidateRecord::new());
        assert_eq!(session.step(), Step::Name);
        assert_eq!(session.start().outcome, TurnOutcome::Greeting);
    }
}
