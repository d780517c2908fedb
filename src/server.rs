use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use http::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::client::ClydeClient;
use crate::error::ClydeError;
use crate::models::chat::{ChatCompletionParams, ChatMessage};
use crate::util::error_response;

const INDEX_HTML: &str = include_str!("../templates/index.html");

/// Shared state of the relay: one client, one model.
#[derive(Debug, Clone)]
pub struct RelayState {
    pub client: ClydeClient,
    pub model: String,
}

/// Body accepted by `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// Build the Axum router with `/`, `/chat` and `/status`.
pub fn build_router(state: RelayState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/", get(index))
        .route("/status", get(status))
        .route("/chat", post(chat))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Service status endpoint exposing the configured model and routes.
async fn status(State(state): State<Arc<RelayState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "clydeai-relay",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.model,
        "routes": ["/", "/chat", "/status"]
    }))
}

/// Forward the browser conversation upstream and return the first choice's content.
async fn chat(State(state): State<Arc<RelayState>>, Json(req): Json<ChatRequest>) -> Response {
    let params = ChatCompletionParams::new(state.model.clone(), req.messages);

    match state.client.chat_completion().create(&params).await {
        Ok(resp) => Json(serde_json::json!({ "response": resp.content() })).into_response(),
        Err(e) => {
            tracing::error!("Relay chat failed: {}", e);
            error_response(relay_status(&e), &e.to_string())
        }
    }
}

/// Map a client failure onto the status the relay answers with.
pub fn relay_status(err: &ClydeError) -> StatusCode {
    match err {
        ClydeError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        ClydeError::RateLimit => StatusCode::TOO_MANY_REQUESTS,
        ClydeError::Connection => StatusCode::SERVICE_UNAVAILABLE,
        // The upstream key is ours, not the browser's.
        ClydeError::Authentication | ClydeError::Unexpected(_) => StatusCode::BAD_GATEWAY,
        ClydeError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
