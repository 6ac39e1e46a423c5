//! HTTP API for the spin flows and the parameter catalog.

use crate::error::ApiError;
use crate::spin::SpinService;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router, extract::State, http::StatusCode, http::header};
use futures_util::Stream;
use serde_json::json;
use storywheel_core::{
    CompareRequest, Gender, GenderCategory, RelayEvent, SpinRequest, decades, places,
};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tracing::instrument;

/// Creates the API router.
pub fn create_router(service: SpinService) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/spin/story/stream", post(story_stream))
        .route("/api/spin/image", post(story_image))
        .route("/api/spin/compare-scenarios/stream", post(compare_stream))
        .route("/api/parameterization/genders", get(get_genders))
        .route("/api/parameterization/times", get(get_times))
        .route("/api/parameterization/places", get(get_places))
        .with_state(service)
}

/// Health check endpoint.
#[instrument(skip_all)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Streams one generated story as server-sent events.
#[instrument(skip(service, request))]
async fn story_stream(
    State(service): State<SpinService>,
    Json(request): Json<SpinRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let events = service.stream_story(request).await?;
    Ok(sse_response(events))
}

/// Returns one generated image for the story parameters.
#[instrument(skip(service, request))]
async fn story_image(
    State(service): State<SpinService>,
    Json(request): Json<SpinRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let image = service.generate_image(request).await?;
    let (bytes, content_type) = image.into_parts();
    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                "inline; filename=\"story-image.png\"".to_string(),
            ),
        ],
        bytes,
    ))
}

/// Streams the comparison of two generated stories as server-sent events.
#[instrument(skip(service, request))]
async fn compare_stream(
    State(service): State<SpinService>,
    Json(request): Json<CompareRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let events = service.stream_comparison(request).await?;
    Ok(sse_response(events))
}

/// Translates relay events into the client-facing SSE vocabulary: a named
/// "sources" event with the comma-joined citation list, unnamed data events
/// per fragment, stream end on completion, stream error on failure.
fn sse_response(
    events: ReceiverStream<RelayEvent>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = async_stream::stream! {
        let mut events = events;
        while let Some(event) = events.next().await {
            match event {
                RelayEvent::Sources(sources) => {
                    yield Ok(Event::default().event("sources").data(sources.join(",")));
                }
                RelayEvent::Content(text) => {
                    yield Ok(Event::default().data(text));
                }
                RelayEvent::Done => break,
                RelayEvent::Failed { status, message } => {
                    yield Err(axum::Error::new(format!(
                        "upstream failure (status {status}): {message}"
                    )));
                    break;
                }
            }
        }
    };
    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Lists the allowed gender parameters.
#[instrument(skip_all)]
async fn get_genders() -> Json<Vec<Gender>> {
    Json(GenderCategory::all().into_iter().map(Gender::new).collect())
}

/// Lists the allowed decades.
#[instrument(skip_all)]
async fn get_times() -> Json<Vec<i32>> {
    Json(decades())
}

/// Lists the allowed cities.
#[instrument(skip_all)]
async fn get_places() -> Json<Vec<&'static str>> {
    Json(places())
}
