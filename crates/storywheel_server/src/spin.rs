//! Generation orchestration: the three spin flows.

use crate::error::ApiError;
use crate::relay::StreamRelay;
use futures_util::{Stream, StreamExt};
use std::sync::Arc;
use storywheel_core::{
    CompareRequest, NO_SEED_CONTEXT, RelayEvent, SeedResult, SeedStore, SpinRequest,
    build_compare_prompt, build_story_prompt,
};
use storywheel_models::{
    GeneratedImage, ImageClient, RawChunk, RouterClient, UpstreamError, extract_fragments,
};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, instrument};

/// Status reported on the stream when the upstream failure carried none.
const GENERIC_FAILURE_STATUS: u16 = 502;

/// Composes the seed store, text client, and image client into the three
/// request flows. All state is request-scoped; the service itself is shared
/// freely across requests.
#[derive(Clone)]
pub struct SpinService {
    seeds: Arc<dyn SeedStore>,
    text: RouterClient,
    image: ImageClient,
}

impl SpinService {
    /// Creates a new spin service.
    pub fn new(seeds: Arc<dyn SeedStore>, text: RouterClient, image: ImageClient) -> Self {
        Self { seeds, text, image }
    }

    /// Single-story streaming flow.
    ///
    /// Validates, resolves the seed, and opens the relay; the returned
    /// stream carries the sources event first, then content fragments,
    /// then the terminal event. Dropping the stream cancels the upstream
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for validation or seed store failure; once
    /// this method returns, failure is reported on the stream instead.
    #[instrument(skip(self), fields(city = %request.city, decade = request.decade))]
    pub async fn stream_story(
        &self,
        request: SpinRequest,
    ) -> Result<ReceiverStream<RelayEvent>, ApiError> {
        request.validate()?;

        let seed = self.resolve_seed(&request).await?;
        let (seed_text, sources) = seed_context(seed);
        let prompt = build_story_prompt(&request, &seed_text);

        let (relay, events) = StreamRelay::channel();
        let upstream = self.text.generate_stream(&prompt);
        tokio::spawn(pump(relay, sources, upstream));

        Ok(events)
    }

    /// Single-story image flow.
    ///
    /// Uses the same prompt construction as the story flows; no text is
    /// generated.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for validation, seed store, or image
    /// endpoint failure.
    #[instrument(skip(self), fields(city = %request.city, decade = request.decade))]
    pub async fn generate_image(&self, request: SpinRequest) -> Result<GeneratedImage, ApiError> {
        request.validate()?;

        let seed = self.resolve_seed(&request).await?;
        let (seed_text, _) = seed_context(seed);
        let prompt = build_story_prompt(&request, &seed_text);

        let image = self.image.generate_image(&prompt).await?;
        info!(bytes = image.bytes().len(), "Generated story image");
        Ok(image)
    }

    /// Two-story comparison streaming flow.
    ///
    /// Both stories are materialized through sequential blocking calls
    /// before the comparison stream opens; if the first generation fails
    /// the second is never attempted. Citation links keep story order.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for validation, seed store, or blocking
    /// generation failure; the streamed comparison itself reports failure
    /// on the stream.
    #[instrument(skip(self, request))]
    pub async fn stream_comparison(
        &self,
        request: CompareRequest,
    ) -> Result<ReceiverStream<RelayEvent>, ApiError> {
        request.validate()?;

        let first_seed = self.resolve_seed(&request.first).await?;
        let second_seed = self.resolve_seed(&request.second).await?;
        let (first_text, mut sources) = seed_context(first_seed);
        let (second_text, second_sources) = seed_context(second_seed);
        sources.extend(second_sources);

        // Sequential by design: the second story is never generated when
        // the first fails.
        let first_story = self
            .text
            .generate(&build_story_prompt(&request.first, &first_text))
            .await?;
        debug!(chars = first_story.len(), "Materialized first story");
        let second_story = self
            .text
            .generate(&build_story_prompt(&request.second, &second_text))
            .await?;
        debug!(chars = second_story.len(), "Materialized second story");

        let prompt =
            build_compare_prompt(&request.first, &request.second, &first_story, &second_story);

        let (relay, events) = StreamRelay::channel();
        let upstream = self.text.generate_stream(&prompt);
        tokio::spawn(pump(relay, sources, upstream));

        Ok(events)
    }

    async fn resolve_seed(&self, request: &SpinRequest) -> Result<Option<SeedResult>, ApiError> {
        let seed = self
            .seeds
            .fetch_seed(&request.city, request.decade, request.gender.id)
            .await?;
        debug!(found = seed.is_some(), "Resolved seed");
        Ok(seed)
    }
}

/// Splits a resolved seed into prompt context and citation list.
fn seed_context(seed: Option<SeedResult>) -> (String, Vec<String>) {
    match seed {
        Some(seed) => {
            let sources = seed
                .link
                .into_iter()
                .filter(|link| !link.trim().is_empty())
                .collect();
            (seed.text, sources)
        }
        None => (NO_SEED_CONTEXT.to_string(), Vec::new()),
    }
}

/// Drives one upstream chunk stream through the delta extractor into the
/// relay. Runs as a detached task per stream; a disconnected relay stops
/// forwarding and drops the upstream connection with it.
async fn pump(
    relay: StreamRelay,
    sources: Vec<String>,
    upstream: impl Stream<Item = Result<RawChunk, UpstreamError>> + Send,
) {
    let relay = match relay.send_sources(sources).await {
        Ok(relay) => relay,
        Err(_) => return,
    };

    tokio::pin!(upstream);
    while let Some(item) = upstream.next().await {
        match item {
            Ok(chunk) => {
                for fragment in extract_fragments(chunk.as_str()) {
                    if relay.send_content(fragment).await.is_err() {
                        return;
                    }
                }
            }
            Err(err) => {
                let status = err.status_code().unwrap_or(GENERIC_FAILURE_STATUS);
                let _ = relay.fail(status, err.to_string()).await;
                return;
            }
        }
    }

    let _ = relay.complete().await;
}
