// src/chatbot/sentiment.rs
use std::collections::HashSet;

use crate::types::Sentiment;

const POSITIVE_WORDS: [&str; 7] = [
    "great",
    "good",
    "excellent",
    "amazing",
    "love",
    "enjoy",
    "passionate",
];

const NEGATIVE_WORDS: [&str; 6] = [
    "bad",
    "difficult",
    "hard",
    "problem",
    "issue",
    "challenging",
];

/// Keyword-intersection sentiment. Repeated words count once.
pub fn classify(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();
    let words: HashSet<&str> = lowered.split_whitespace().collect();

    let positive = POSITIVE_WORDS.iter().filter(|w| words.contains(*w)).count();
    let negative = NEGATIVE_WORDS.iter().filter(|w| words.contains(*w)).count();

    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
