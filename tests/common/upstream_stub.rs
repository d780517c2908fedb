#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Local stand-in for the Clyde AI API.
///
/// Serves `POST /v1/chat/completions` on an ephemeral port, answers every call
/// with the configured reply and records what it received.
#[derive(Clone)]
pub struct UpstreamStub {
    base_url: String,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    shutdown: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

#[derive(Clone, Debug)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    /// `Value::Null` if the body was not JSON.
    pub body: serde_json::Value,
}

#[derive(Clone)]
pub enum UpstreamReply {
    Json {
        status: StatusCode,
        body: serde_json::Value,
    },
    Text {
        status: StatusCode,
        body: String,
    },
}

#[derive(Clone)]
struct StubState {
    reply: UpstreamReply,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl UpstreamStub {
    pub async fn start(reply: UpstreamReply) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = Arc::new(StubState {
            reply,
            calls: calls.clone(),
            requests: requests.clone(),
        });

        let router = Router::new()
            .route("/v1/chat/completions", post(completions_handler))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub upstream");
        let addr = listener.local_addr().expect("stub upstream local addr");
        let (tx, rx) = oneshot::channel::<()>();

        let server = axum::serve(listener, router.into_make_service());
        tokio::spawn(async move {
            tokio::select! {
                res = server => {
                    if let Err(err) = res {
                        eprintln!("Stub upstream server error: {err:?}");
                    }
                }
                _ = rx => {}
            }
        });

        UpstreamStub {
            base_url: format!("http://{}/v1", addr),
            calls,
            requests,
            shutdown: Arc::new(Mutex::new(Some(tx))),
        }
    }

    /// Stub answering 200 with `body`.
    pub async fn ok(body: serde_json::Value) -> Self {
        Self::start(UpstreamReply::Json {
            status: StatusCode::OK,
            body,
        })
        .await
    }

    /// Stub answering `status` with a plain-text `body`.
    pub async fn failing(status: StatusCode, body: &str) -> Self {
        Self::start(UpstreamReply::Text {
            status,
            body: body.to_string(),
        })
        .await
    }

    /// Base URL including the `/v1` segment, as the client expects it.
    pub fn url(&self) -> String {
        self.base_url.clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn take_requests(&self) -> Vec<CapturedRequest> {
        let mut guard = self.requests.lock().expect("lock stub requests");
        guard.drain(..).collect()
    }
}

impl Drop for UpstreamStub {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.shutdown.lock() {
            if let Some(tx) = guard.take() {
                let _ = tx.send(());
            }
        }
    }
}

async fn completions_handler(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);

    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let captured = CapturedRequest {
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    };
    if let Ok(mut guard) = state.requests.lock() {
        guard.push(captured);
    }

    match &state.reply {
        UpstreamReply::Json { status, body } => (*status, Json(body.clone())).into_response(),
        UpstreamReply::Text { status, body } => (*status, body.clone()).into_response(),
    }
}

/// The canonical successful reply used across tests.
pub fn hello_reply() -> serde_json::Value {
    serde_json::json!({
        "id": "x",
        "choices": [
            {"message": {"role": "assistant", "content": "hello"}, "finish_reason": "stop"}
        ],
        "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
    })
}
