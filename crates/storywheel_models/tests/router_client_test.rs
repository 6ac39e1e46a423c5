//! Tests for the router client against a local stub provider.

use axum::Router;
use axum::body::Body;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use futures_util::StreamExt;
use serde_json::json;
use storywheel_models::{RouterClient, extract_fragments};

/// Binds a stub provider on an ephemeral port and returns its endpoint URL.
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });
    format!("http://{addr}/v1/chat/completions")
}

fn client_for(url: String) -> RouterClient {
    RouterClient::new("test-token", "stub-model", url, "stub-provider")
}

#[tokio::test]
async fn blocking_generate_decodes_chat_shape() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            axum::Json(json!({
                "choices": [{"message": {"role": "assistant", "content": "a short story"}}]
            }))
        }),
    );
    let client = client_for(spawn_stub(router).await);

    let story = client.generate("prompt").await.unwrap();
    assert_eq!(story, "a short story");
}

#[tokio::test]
async fn blocking_generate_decodes_legacy_shape() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { axum::Json(json!([{"generated_text": "legacy story"}])) }),
    );
    let client = client_for(spawn_stub(router).await);

    let story = client.generate("prompt").await.unwrap();
    assert_eq!(story, "legacy story");
}

#[tokio::test]
async fn blocking_generate_surfaces_upstream_status() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
    );
    let client = client_for(spawn_stub(router).await);

    let err = client.generate("prompt").await.unwrap_err();
    assert_eq!(err.status_code(), Some(429));
    assert!(err.to_string().contains("rate limited"));
}

#[tokio::test]
async fn blocking_generate_rejects_unknown_body() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { axum::Json(json!({"unexpected": true})) }),
    );
    let client = client_for(spawn_stub(router).await);

    let err = client.generate("prompt").await.unwrap_err();
    assert_eq!(err.status_code(), None);
}

/// Stub streaming body in the provider's line-prefixed wire format.
fn sse_body(lines: &[&str]) -> impl IntoResponse {
    let body = lines
        .iter()
        .map(|line| format!("{line}\n"))
        .collect::<String>();
    (
        [(axum::http::header::CONTENT_TYPE, "text/event-stream")],
        Body::from(body),
    )
}

#[tokio::test]
async fn streaming_yields_data_lines_in_order() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            sse_body(&[
                r#"data: {"choices":[{"delta":{"content":"Once "}}]}"#,
                "",
                r#"data: {"choices":[{"delta":{"content":"upon"}}]}"#,
                "",
                "data: [DONE]",
            ])
        }),
    );
    let client = client_for(spawn_stub(router).await);

    let chunks: Vec<_> = client.generate_stream("prompt").collect().await;
    let lines: Vec<String> = chunks
        .into_iter()
        .map(|chunk| chunk.unwrap().as_str().to_string())
        .collect();

    // Blank separator lines are dropped, payload lines kept in order.
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Once "));
    assert!(lines[1].contains("upon"));
    assert!(lines[2].ends_with("[DONE]"));
}

#[tokio::test]
async fn streamed_fragments_reassemble_the_story() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            sse_body(&[
                r#"data: {"choices":[{"delta":{"content":"Born in "}}]}"#,
                ": keep-alive",
                "data: not json heartbeat",
                r#"data: {"choices":[{"delta":{"content":[{"text":"1900 in "},{"text":"Malmö."}]}}]}"#,
                "data: [DONE]",
            ])
        }),
    );
    let client = client_for(spawn_stub(router).await);

    let mut story = String::new();
    let mut stream = Box::pin(client.generate_stream("prompt"));
    while let Some(chunk) = stream.next().await {
        for fragment in extract_fragments(chunk.unwrap().as_str()) {
            story.push_str(&fragment);
        }
    }

    // Malformed chunks are skipped without aborting; later chunks still land.
    assert_eq!(story, "Born in 1900 in Malmö.");
}

#[tokio::test]
async fn streaming_surfaces_non_success_status_as_error() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let client = client_for(spawn_stub(router).await);

    let chunks: Vec<_> = client.generate_stream("prompt").collect().await;
    assert_eq!(chunks.len(), 1);
    let err = chunks.into_iter().next().unwrap().unwrap_err();
    assert_eq!(err.status_code(), Some(502));
}
