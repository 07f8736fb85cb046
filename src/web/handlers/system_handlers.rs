// src/web/handlers/system_handlers.rs
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

use crate::web::sessions::SessionRegistry;
use crate::web::types::*;

pub async fn health_handler(registry: &State<SessionRegistry>) -> Json<TextResponse> {
    let active = registry.len().await;
    info!("Health check ({} active sessions)", active);
    Json(TextResponse::success(format!("OK ({} active sessions)", active)))
}
