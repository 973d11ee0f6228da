//! In-process fake of the Ollama chat endpoint.
//!
//! Serves `POST /api/chat` on an ephemeral port, answers with a configured
//! status and assistant message, and records what it received.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct RecordedChat {
    pub body: Value,
    pub authorization: Option<String>,
}

struct EngineState {
    status: StatusCode,
    content: String,
    received: Mutex<Vec<RecordedChat>>,
}

pub struct FakeEngine {
    pub addr: SocketAddr,
    state: Arc<EngineState>,
}

impl FakeEngine {
    /// Answer every chat with `content` as the assistant message.
    pub async fn answering(content: impl Into<String>) -> Self {
        Self::start(StatusCode::OK, content.into()).await
    }

    /// Answer every chat with an error status and Ollama's error body.
    pub async fn failing(status: StatusCode, error: impl Into<String>) -> Self {
        Self::start(status, error.into()).await
    }

    async fn start(status: StatusCode, content: String) -> Self {
        let state = Arc::new(EngineState {
            status,
            content,
            received: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/chat", post(chat))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake engine");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake engine crashed");
        });

        Self { addr, state }
    }

    pub fn api_base(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn received(&self) -> Vec<RecordedChat> {
        self.state.received.lock().unwrap().clone()
    }
}

async fn chat(
    State(state): State<Arc<EngineState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let model = body["model"].as_str().unwrap_or_default().to_string();
    state.received.lock().unwrap().push(RecordedChat {
        body,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    if state.status != StatusCode::OK {
        return (state.status, Json(json!({ "error": state.content })));
    }

    (
        StatusCode::OK,
        Json(json!({
            "model": model,
            "message": { "role": "assistant", "content": state.content },
            "done": true,
            "prompt_eval_count": 120,
            "eval_count": 80
        })),
    )
}
