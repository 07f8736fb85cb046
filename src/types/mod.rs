pub mod candidate;

pub use candidate::{CandidateRecord, Message, Role, Sentiment, SentimentCounts};
