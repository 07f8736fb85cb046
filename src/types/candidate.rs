// src/types/candidate.rs
//! Candidate intake data structures shared by the chatbot, the store and the API

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::{mask_email, mask_phone, validate_email, validate_phone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

impl Message {
    pub fn user(content: impl Into<String>, sentiment: Sentiment) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            sentiment: Some(sentiment),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            sentiment: None,
        }
    }
}

/// Everything collected from one candidate during a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: String,
    pub position: String,
    pub location: String,
    pub tech_stack: Vec<String>,
    pub tech_questions_asked: bool,
    pub sentiment_history: Vec<Sentiment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl CandidateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once any field has been filled in
    pub fn has_data(&self) -> bool {
        !(self.name.is_empty()
            && self.email.is_empty()
            && self.phone.is_empty()
            && self.experience.is_empty()
            && self.position.is_empty()
            && self.location.is_empty()
            && self.tech_stack.is_empty())
    }

    pub fn sentiment_counts(&self) -> SentimentCounts {
        let mut counts = SentimentCounts::default();
        for sentiment in &self.sentiment_history {
            match sentiment {
                Sentiment::Positive => counts.positive += 1,
                Sentiment::Negative => counts.negative += 1,
                Sentiment::Neutral => counts.neutral += 1,
            }
        }
        counts
    }

    /// Fields accepted by the conversation that fail the strict format checks
    pub fn strict_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.email.is_empty() && !validate_email(&self.email) {
            warnings.push(format!(
                "Email '{}' does not look like a full address",
                mask_email(&self.email)
            ));
        }
        if !self.phone.is_empty() && !validate_phone(&self.phone) {
            warnings.push("Phone number should have between 10 and 15 digits".to_string());
        }
        warnings
    }

    /// Markdown summary for display. Email and phone are masked; empty fields are skipped.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        if !self.name.is_empty() {
            lines.push(format!("**Name:** {}", self.name));
        }
        if !self.email.is_empty() {
            lines.push(format!("**Email:** {}", mask_email(&self.email)));
        }
        if !self.phone.is_empty() {
            lines.push(format!("**Phone:** {}", mask_phone(&self.phone)));
        }
        if !self.experience.is_empty() {
            lines.push(format!("**Experience:** {}", self.experience));
        }
        if !self.position.is_empty() {
            lines.push(format!("**Position:** {}", self.position));
        }
        if !self.location.is_empty() {
            lines.push(format!("**Location:** {}", self.location));
        }
        if !self.tech_stack.is_empty() {
            lines.push("**Tech Stack:**".to_string());
            lines.extend(self.tech_stack.iter().map(|tech| format!("- {}", tech)));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_masks_contact_fields() {
        let record = CandidateRecord {
            name: "Jane Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            phone: "555-123-4567".to_string(),
            tech_stack: vec!["Rust".to_string(), "Go".to_string()],
            ..Default::default()
        };

        let summary = record.summary();
        assert_eq!(
            summary,
            "**Name:** Jane Doe\n\
             **Email:** jan...@example.com\n\
             **Phone:** ****-****-4567\n\
             **Tech Stack:**\n\
             - Rust\n\
             - Go"
        );
        assert!(!summary.contains("Experience"));
    }

    #[test]
    fn test_empty_record() {
        let record = CandidateRecord::new();
        assert!(!record.has_data());
        assert_eq!(record.summary(), "");
    }

    #[test]
    fn test_strict_warnings() {
        let mut record = CandidateRecord {
            email: "jane.doe@example.com".to_string(),
            phone: "555-123-4567".to_string(),
            ..Default::default()
        };
        assert!(record.strict_warnings().is_empty());

        record.email = "a@b.c".to_string();
        record.phone = "1234567890123456".to_string();
        let warnings = record.strict_warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("a...@b.c"));
    }

    #[test]
    fn test_sentiment_counts() {
        let record = CandidateRecord {
            sentiment_history: vec![
                Sentiment::Positive,
                Sentiment::Neutral,
                Sentiment::Positive,
                Sentiment::Negative,
            ],
            ..Default::default()
        };
        assert_eq!(
            record.sentiment_counts(),
            SentimentCounts {
                positive: 2,
                negative: 1,
                neutral: 1
            }
        );
    }

    #[test]
    fn test_message_serialization() {
        let json = serde_json::to_value(Message::user("hi", Sentiment::Neutral)).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["sentiment"], "neutral");

        let json = serde_json::to_value(Message::assistant("hello")).unwrap();
        assert!(json.get("sentiment").is_none());
    }
}
