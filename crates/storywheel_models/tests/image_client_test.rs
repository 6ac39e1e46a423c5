//! Tests for the image client against a local stub provider.

use axum::Router;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use storywheel_models::ImageClient;

async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn returns_bytes_and_content_type() {
    let router = Router::new().route(
        "/prompt/:prompt",
        get(|| async {
            (
                [(axum::http::header::CONTENT_TYPE, "image/png")],
                vec![0x89u8, b'P', b'N', b'G'],
            )
        }),
    );
    let client = ImageClient::new(spawn_stub(router).await);

    let image = client.generate_image("a harbor at dusk").await.unwrap();
    assert_eq!(image.content_type(), "image/png");
    assert_eq!(image.bytes(), &vec![0x89u8, b'P', b'N', b'G']);
}

#[tokio::test]
async fn defaults_content_type_to_jpeg() {
    // A bare Response carries no content-type header at all.
    let router = Router::new().route(
        "/prompt/:prompt",
        get(|| async { axum::response::Response::new(axum::body::Body::from(vec![1u8, 2, 3])) }),
    );
    let client = ImageClient::new(spawn_stub(router).await);

    let image = client.generate_image("a harbor at dusk").await.unwrap();
    assert_eq!(image.content_type(), "image/jpeg");
}

#[tokio::test]
async fn prompt_is_url_encoded() {
    let router = Router::new().route(
        "/prompt/:prompt",
        get(|Path(prompt): Path<String>| async move {
            // Axum decodes the path segment; spaces must have survived encoding.
            assert_eq!(prompt, "a story about Malmö");
            vec![1u8]
        }),
    );
    let client = ImageClient::new(spawn_stub(router).await);

    client.generate_image("a story about Malmö").await.unwrap();
}

#[tokio::test]
async fn empty_body_is_an_error() {
    let router = Router::new().route("/prompt/:prompt", get(|| async { Vec::<u8>::new() }));
    let client = ImageClient::new(spawn_stub(router).await);

    let err = client.generate_image("prompt").await.unwrap_err();
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn non_success_status_is_surfaced() {
    let router = Router::new().route(
        "/prompt/:prompt",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
    );
    let client = ImageClient::new(spawn_stub(router).await);

    let err = client.generate_image("prompt").await.unwrap_err();
    assert_eq!(err.status_code(), Some(503));
}
