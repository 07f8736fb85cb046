// src/web/types.rs

use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::chatbot::{Session, Step, TurnOutcome};
use crate::types::{Sentiment, SentimentCounts};
use crate::utils::experience_level;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Action,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_actions: Option<Vec<String>>,
}

#[derive(Serialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

pub type ApiError = status::Custom<Json<StandardErrorResponse>>;

impl TextResponse {
    pub fn success(message: String) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
        }
    }
}

impl ActionResponse {
    pub fn success(message: String, action: String) -> Self {
        Self {
            response_type: ResponseType::Action,
            success: true,
            message,
            action,
            next_actions: None,
        }
    }

    pub fn with_next_actions(mut self, next_actions: Vec<String>) -> Self {
        self.next_actions = Some(next_actions);
        self
    }
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
        }
    }

    pub fn with_status(self, status: Status) -> ApiError {
        status::Custom(status, Json(self))
    }
}

// ===== Requests =====

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct MessageRequest {
    pub message: String,
}

// ===== Response payloads =====

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SessionCreated {
    pub session_id: String,
    pub reply: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TurnData {
    pub reply: String,
    pub outcome: TurnOutcome,
    pub step: Step,
    pub sentiment: Sentiment,
    pub ended: bool,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SessionSummary {
    pub session_id: String,
    pub step: Step,
    pub ended: bool,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    pub tech_questions_asked: bool,
    pub sentiment: SentimentCounts,
    pub warnings: Vec<String>,
}

impl SessionSummary {
    pub fn from_session(session_id: String, session: &Session) -> Self {
        let record = session.record();
        Self {
            session_id,
            step: session.step(),
            ended: session.is_ended(),
            summary: record.summary(),
            experience_level: (!record.experience.is_empty())
                .then(|| experience_level(&record.experience).to_string()),
            tech_questions_asked: record.tech_questions_asked,
            sentiment: record.sentiment_counts(),
            warnings: record.strict_warnings(),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SaveData {
    pub stored_candidates: usize,
}
