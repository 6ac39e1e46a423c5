//! Core data types for the Storywheel generation service.
//!
//! This crate provides the request model, seed store interface, relay event
//! vocabulary, prompt construction, and application configuration shared by
//! the provider clients and the HTTP server.

mod catalog;
mod config;
mod event;
mod gender;
mod prompt;
mod request;
mod seed;

pub use catalog::{decades, places};
pub use config::{AppConfig, AppConfigBuilder, SeedStoreMode};
pub use event::RelayEvent;
pub use gender::{Gender, GenderCategory};
pub use prompt::{NO_SEED_CONTEXT, build_compare_prompt, build_story_prompt};
pub use request::{CompareRequest, SpinRequest};
pub use seed::{DisabledSeedStore, MemorySeedStore, SeedResult, SeedStore};
