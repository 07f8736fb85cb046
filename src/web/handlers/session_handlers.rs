// src/web/handlers/session_handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::store::CandidateStore;
use crate::web::sessions::SessionRegistry;
use crate::web::types::*;

fn session_not_found(id: &str) -> ApiError {
    StandardErrorResponse::new(
        format!("Session '{}' not found", id),
        "SESSION_NOT_FOUND".to_string(),
        vec![
            "Start a new session with POST /api/sessions".to_string(),
            "Sessions are lost when the server restarts".to_string(),
        ],
    )
    .with_status(Status::NotFound)
}

fn parse_session_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| session_not_found(id))
}

pub async fn create_session_handler(
    registry: &State<SessionRegistry>,
) -> Json<DataResponse<SessionCreated>> {
    let (id, greeting) = registry.create().await;

    Json(DataResponse::success(
        "Session started".to_string(),
        SessionCreated {
            session_id: id.to_string(),
            reply: greeting.message,
        },
    ))
}

pub async fn post_message_handler(
    id: &str,
    request: Json<MessageRequest>,
    registry: &State<SessionRegistry>,
) -> Result<Json<DataResponse<TurnData>>, ApiError> {
    let session_id = parse_session_id(id)?;

    let data = registry
        .with_session(session_id, |session| {
            let turn = session.submit(&request.message);
            TurnData {
                reply: turn.reply.message,
                outcome: turn.reply.outcome,
                step: session.step(),
                sentiment: turn.sentiment,
                ended: session.is_ended(),
            }
        })
        .await
        .ok_or_else(|| session_not_found(id))?;

    Ok(Json(DataResponse::success(
        "Message processed".to_string(),
        data,
    )))
}

pub async fn get_session_handler(
    id: &str,
    registry: &State<SessionRegistry>,
) -> Result<Json<DataResponse<SessionSummary>>, ApiError> {
    let session_id = parse_session_id(id)?;

    let summary = registry
        .with_session(session_id, |session| {
            SessionSummary::from_session(session_id.to_string(), session)
        })
        .await
        .ok_or_else(|| session_not_found(id))?;

    Ok(Json(DataResponse::success(
        "Candidate information".to_string(),
        summary,
    )))
}

pub async fn save_session_handler(
    id: &str,
    registry: &State<SessionRegistry>,
    store: &State<CandidateStore>,
) -> Result<Json<DataResponse<SaveData>>, ApiError> {
    let session_id = parse_session_id(id)?;

    let record = registry
        .with_session(session_id, |session| session.record().clone())
        .await
        .ok_or_else(|| session_not_found(id))?;

    for warning in record.strict_warnings() {
        warn!("Session {}: {}", session_id, warning);
    }

    match store.append(&record).await {
        Ok(count) => {
            info!("Session {} saved to {}", session_id, store.path().display());
            Ok(Json(DataResponse::success(
                "Candidate data saved successfully".to_string(),
                SaveData {
                    stored_candidates: count,
                },
            )))
        }
        Err(e) => {
            error!("Error saving candidate data for session {}: {:#}", session_id, e);
            Err(StandardErrorResponse::new(
                "Failed to save candidate data".to_string(),
                "SAVE_FAILED".to_string(),
                vec![
                    "The conversation is unaffected, you can keep chatting".to_string(),
                    "Try saving again later".to_string(),
                ],
            )
            .with_status(Status::InternalServerError))
        }
    }
}

pub async fn reset_session_handler(
    id: &str,
    registry: &State<SessionRegistry>,
) -> Result<Json<ActionResponse>, ApiError> {
    let session_id = parse_session_id(id)?;

    if !registry.remove(session_id).await {
        return Err(session_not_found(id));
    }

    Ok(Json(
        ActionResponse::success("Conversation reset".to_string(), "reset".to_string())
            .with_next_actions(vec!["Start a new session with POST /api/sessions".to_string()]),
    ))
}
