// src/web/mod.rs

pub mod handlers;
pub mod sessions;
pub mod types;

pub use sessions::SessionRegistry;
pub use types::*;

use crate::store::CandidateStore;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, delete, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/sessions")]
pub async fn create_session(
    registry: &State<SessionRegistry>,
) -> Json<DataResponse<SessionCreated>> {
    handlers::create_session_handler(registry).await
}

#[post("/sessions/<id>/messages", data = "<request>")]
pub async fn post_message(
    id: &str,
    request: Json<MessageRequest>,
    registry: &State<SessionRegistry>,
) -> Result<Json<DataResponse<TurnData>>, ApiError> {
    handlers::post_message_handler(id, request, registry).await
}

#[get("/sessions/<id>")]
pub async fn get_session(
    id: &str,
    registry: &State<SessionRegistry>,
) -> Result<Json<DataResponse<SessionSummary>>, ApiError> {
    handlers::get_session_handler(id, registry).await
}

#[post("/sessions/<id>/save")]
pub async fn save_session(
    id: &str,
    registry: &State<SessionRegistry>,
    store: &State<CandidateStore>,
) -> Result<Json<DataResponse<SaveData>>, ApiError> {
    handlers::save_session_handler(id, registry, store).await
}

#[delete("/sessions/<id>")]
pub async fn reset_session(
    id: &str,
    registry: &State<SessionRegistry>,
) -> Result<Json<ActionResponse>, ApiError> {
    handlers::reset_session_handler(id, registry).await
}

#[get("/health")]
pub async fn health(registry: &State<SessionRegistry>) -> Json<TextResponse> {
    handlers::health_handler(registry).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec!["Send a JSON body like {\"message\": \"...\"}".to_string()],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Resource not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Check the request path".to_string()],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body could not be parsed".to_string(),
        "UNPROCESSABLE_ENTITY".to_string(),
        vec!["Send a JSON body like {\"message\": \"...\"}".to_string()],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Reset the conversation and try again".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

/// Assemble the application without launching it
pub fn build_rocket(
    registry: SessionRegistry,
    store: CandidateStore,
    port: u16,
) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .attach(Cors)
        .manage(registry)
        .manage(store)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![
                create_session,
                post_message,
                get_session,
                save_session,
                reset_session,
                health,
                options,
            ],
        )
}

pub async fn start_web_server(
    registry: SessionRegistry,
    store: CandidateStore,
    port: u16,
) -> Result<()> {
    info!("Starting TalentScout intake API server");
    info!("Candidate store: {}", store.path().display());
    info!("Server: http://0.0.0.0:{}", port);

    build_rocket(registry, store, port)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chatbot::StaticGreeting;
    use rocket::http::ContentType;
    use rocket::local::blocking::Client;
    use std::sync::Arc;

    fn client(dir: &std::path::Path) -> Client {
        let greeting = StaticGreeting::load(&dir.join("model_cache")).unwrap();
        let registry = SessionRegistry::new(Arc::new(greeting));
        let store = CandidateStore::new(dir.join("candidates.json"));
        Client::tracked(build_rocket(registry, store, 0)).unwrap()
    }

    fn start(client: &Client) -> String {
        let response = client.post("/api/sessions").dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body: serde_json::Value = response.into_json().unwrap();
        assert_eq!(body["type"], "data");
        assert!(body["data"]["reply"]
            .as_str()
            .unwrap()
            .starts_with("Hello! I'm the TalentScout Hiring Assistant."));
        body["data"]["session_id"].as_str().unwrap().to_string()
    }

    fn send(client: &Client, id: &str, message: &str) -> serde_json::Value {
        let response = client
            .post(format!("/api/sessions/{}/messages", id))
            .header(ContentType::JSON)
            .body(serde_json::json!({ "message": message }).to_string())
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        response.into_json().unwrap()
    }

    #[test]
    fn test_conversation_over_http() {
        let tmp = tempfile::tempdir().unwrap();
        let client = client(tmp.path());
        let id = start(&client);

        let body = send(&client, &id, "John Smith");
        assert_eq!(body["data"]["outcome"], "accepted");
        assert_eq!(body["data"]["step"], "email");
        assert_eq!(body["data"]["sentiment"], "neutral");

        let body = send(&client, &id, "nope");
        assert_eq!(body["data"]["outcome"], "rejected");
        assert_eq!(body["data"]["step"], "email");

        let body = send(&client, &id, "bye");
        assert_eq!(body["data"]["outcome"], "ended");
        assert_eq!(body["data"]["ended"], true);
    }

    #[test]
    fn test_summary_and_save() {
        let tmp = tempfile::tempdir().unwrap();
        let client = client(tmp.path());
        let id = start(&client);

        send(&client, &id, "Jane Doe");
        send(&client, &id, "a@b.c");

        let response = client.get(format!("/api/sessions/{}", id)).dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body: serde_json::Value = response.into_json().unwrap();
        assert_eq!(body["data"]["step"], "phone");
        assert_eq!(body["data"]["sentiment"]["neutral"], 2);
        assert_eq!(body["data"]["warnings"].as_array().unwrap().len(), 1);

        let response = client.post(format!("/api/sessions/{}/save", id)).dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body: serde_json::Value = response.into_json().unwrap();
        assert_eq!(body["data"]["stored_candidates"], 1);

        let saved = std::fs::read_to_string(tmp.path().join("candidates.json")).unwrap();
        assert!(saved.contains("Jane Doe"));
        assert!(!saved.contains("a@b.c"));
    }

    #[test]
    fn test_reset_removes_session() {
        let tmp = tempfile::tempdir().unwrap();
        let client = client(tmp.path());
        let id = start(&client);

        let response = client.delete(format!("/api/sessions/{}", id)).dispatch();
        assert_eq!(response.status(), Status::Ok);

        let response = client.get(format!("/api/sessions/{}", id)).dispatch();
        assert_eq!(response.status(), Status::NotFound);
        let body: serde_json::Value = response.into_json().unwrap();
        assert_eq!(body["error_code"], "SESSION_NOT_FOUND");
    }

    #[test]
    fn test_unknown_and_malformed_ids() {
        let tmp = tempfile::tempdir().unwrap();
        let client = client(tmp.path());

        let response = client.get("/api/sessions/not-a-uuid").dispatch();
        assert_eq!(response.status(), Status::NotFound);

        let response = client
            .get(format!("/api/sessions/{}", uuid::Uuid::new_v4()))
            .dispatch();
        assert_eq!(response.status(), Status::NotFound);
    }

    #[test]
    fn test_health() {
        let tmp = tempfile::tempdir().unwrap();
        let client = client(tmp.path());
        start(&client);

        let response = client.get("/api/health").dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body: serde_json::Value = response.into_json().unwrap();
        assert_eq!(body["message"], "OK (1 active sessions)");
    }
}
