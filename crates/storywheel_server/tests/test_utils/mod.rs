//! Shared stub provider for flow tests.
//!
//! One axum handler impersonates the chat completions endpoint: blocking
//! calls pop scripted replies, streaming calls replay scripted wire lines.
//! Every call records its prompt so tests can assert on prompt content and
//! call counts.

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scripted outcome of one blocking completion call.
#[derive(Debug, Clone)]
pub enum BlockingReply {
    /// Respond with this text in the OpenAI chat shape
    Text(String),
    /// Fail with this HTTP status
    Status(u16),
}

/// Shared state of the stub completions endpoint.
#[derive(Clone, Default)]
pub struct StubProvider {
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
    blocking: Arc<Mutex<VecDeque<BlockingReply>>>,
    stream_lines: Arc<Mutex<Vec<String>>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the reply for the next blocking call.
    pub fn push_blocking(&self, reply: BlockingReply) {
        self.blocking.lock().unwrap().push_back(reply);
    }

    /// Sets the wire lines replayed to every streaming call.
    pub fn set_stream_lines(&self, lines: &[&str]) {
        *self.stream_lines.lock().unwrap() = lines.iter().map(|s| s.to_string()).collect();
    }

    /// Number of completion calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Binds the stub on an ephemeral port and returns its endpoint URL.
    pub async fn spawn(&self) -> String {
        let router = Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve stub");
        });
        format!("http://{addr}/v1/chat/completions")
    }
}

async fn completions(State(state): State<StubProvider>, body: String) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);

    let request: serde_json::Value = serde_json::from_str(&body).expect("json request body");
    let prompt = request["messages"][0]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    state.prompts.lock().unwrap().push(prompt);

    if request["stream"].as_bool().unwrap_or(false) {
        let body: String = state
            .stream_lines
            .lock()
            .unwrap()
            .iter()
            .map(|line| format!("{line}\n"))
            .collect();
        return (
            [(header::CONTENT_TYPE, "text/event-stream")],
            axum::body::Body::from(body),
        )
            .into_response();
    }

    match state.blocking.lock().unwrap().pop_front() {
        Some(BlockingReply::Text(text)) => axum::Json(json!({
            "choices": [{"message": {"role": "assistant", "content": text}}]
        }))
        .into_response(),
        Some(BlockingReply::Status(status)) => (
            StatusCode::from_u16(status).expect("valid status"),
            "stub failure",
        )
            .into_response(),
        None => axum::Json(json!({
            "choices": [{"message": {"role": "assistant", "content": "unscripted"}}]
        }))
        .into_response(),
    }
}
