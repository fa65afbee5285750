//! HTTP surface: the chat endpoint and liveness probe.

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use uuid::Uuid;

use crate::pipeline::processor::ChatPipeline;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ChatPipeline>,
}

/// Build the router with the chat and liveness routes.
///
/// CORS is wide open — the reference frontend is served from another origin.
/// The CORS layer sits outermost so even panic responses carry the headers.
pub fn chat_routes(pipeline: Arc<ChatPipeline>) -> Router {
    let state = AppState { pipeline };

    Router::new()
        .route("/", get(index))
        .route("/chat", post(chat))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> &'static str {
    "Charan's Bank chatbot backend is running."
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
}

async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = body else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Request must be JSON"})),
        )
            .into_response();
    };

    let Some(message) = request.message.filter(|m| !m.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Missing 'message' key in request body"})),
        )
            .into_response();
    };

    let request_id = Uuid::new_v4();
    info!(%request_id, message = %message, "chat message received");

    let response = state.pipeline.handle(&message).await;

    info!(%request_id, reply = %response, "chat reply sent");
    Json(ChatResponse { response }).into_response()
}

/// Outermost failure boundary: a panic anywhere below becomes a 500 with a
/// generic apology instead of a dropped connection.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!(panic = %detail, "chat handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "response": "Sorry, I encountered an internal problem. Please try again later."
        })),
    )
        .into_response()
}
