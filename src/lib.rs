pub mod chatbot;
pub mod cli;
pub mod config;
pub mod store;
pub mod types;
pub mod utils;
pub mod web;

pub use chatbot::{Chatbot, Session, Step};
pub use config::ConfigManager;
pub use store::CandidateStore;
pub use types::CandidateRecord;
pub use web::start_web_server;
