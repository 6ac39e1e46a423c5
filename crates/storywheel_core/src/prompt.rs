//! Prompt construction for story and comparison generation.
//!
//! Pure functions with no failure modes. The exact wording is load-bearing
//! only insofar as it embeds the request parameters and seed context
//! verbatim and instructs the model to return narrative text alone.

use crate::SpinRequest;

/// Seed context used when no archive seed was found for the request.
pub const NO_SEED_CONTEXT: &str =
    "No matching archive seed; use the provided context to craft a new story.";

/// Builds the prompt for a single life story.
pub fn build_story_prompt(request: &SpinRequest, seed_text: &str) -> String {
    format!(
        "Write a short, realistic story set in {} around year {} about a {}\n\n\
         Context: {}\n\n\
         Return only the story text.",
        request.city,
        request.decade,
        request.gender.description(),
        seed_text
    )
}

/// Builds the prompt comparing two fully materialized stories.
pub fn build_compare_prompt(
    first: &SpinRequest,
    second: &SpinRequest,
    first_story: &str,
    second_story: &str,
) -> String {
    format!(
        "Compare the two historical stories below. Highlight key differences in setting, \
         tone, and perspective. Be concise (max 6 sentences). \
         Story 1 ({}, {}, {}):\n{}\n\n\
         Story 2 ({}, {}, {}):\n{}",
        first.city,
        first.decade,
        first.gender.description(),
        first_story,
        second.city,
        second.decade,
        second.gender.description(),
        second_story
    )
}
