//! Seed store interface and in-process implementations.
//!
//! A seed is a short pre-existing narrative fragment, optionally with a
//! citation link, used as grounding context for generation. "No seed" is a
//! first-class outcome; only infrastructure failure is an error.

use crate::GenderCategory;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use storywheel_error::SeedStoreError;

/// A resolved seed: grounding text plus an optional citation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedResult {
    /// Seed narrative text, always present
    pub text: String,
    /// Optional citation link surfaced to the client as stream metadata
    pub link: Option<String>,
}

impl SeedResult {
    /// Creates a seed result.
    pub fn new(text: impl Into<String>, link: Option<String>) -> Self {
        Self {
            text: text.into(),
            link,
        }
    }
}

/// Lookup of grounding seeds by (city, decade, gender).
#[async_trait]
pub trait SeedStore: Send + Sync {
    /// Fetches the seed for the given parameters.
    ///
    /// Returns `Ok(None)` when the store is disabled, no record matches, or
    /// a matching record has empty text.
    ///
    /// # Errors
    ///
    /// Returns a [`SeedStoreError`] only for infrastructure failure in the
    /// store itself.
    async fn fetch_seed(
        &self,
        city: &str,
        decade: i32,
        gender: GenderCategory,
    ) -> Result<Option<SeedResult>, SeedStoreError>;
}

/// Seed store stand-in used when seeding is feature-flagged off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSeedStore;

#[async_trait]
impl SeedStore for DisabledSeedStore {
    async fn fetch_seed(
        &self,
        _city: &str,
        _decade: i32,
        _gender: GenderCategory,
    ) -> Result<Option<SeedResult>, SeedStoreError> {
        Ok(None)
    }
}

/// In-process seed store keyed by (city, decade, gender).
#[derive(Debug, Clone, Default)]
pub struct MemorySeedStore {
    records: HashMap<(String, i32, GenderCategory), SeedResult>,
}

impl MemorySeedStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with the curated Swedish city seeds.
    pub fn with_builtin_seeds() -> Self {
        let mut store = Self::new();
        for (city, decade, gender, text, link) in builtin_seeds() {
            store.insert(city, decade, gender, SeedResult::new(text, Some(link.to_string())));
        }
        store
    }

    /// Inserts or replaces the seed for (city, decade, gender).
    pub fn insert(
        &mut self,
        city: impl Into<String>,
        decade: i32,
        gender: GenderCategory,
        seed: SeedResult,
    ) {
        self.records.insert((city.into(), decade, gender), seed);
    }
}

#[async_trait]
impl SeedStore for MemorySeedStore {
    async fn fetch_seed(
        &self,
        city: &str,
        decade: i32,
        gender: GenderCategory,
    ) -> Result<Option<SeedResult>, SeedStoreError> {
        let seed = self
            .records
            .get(&(city.to_string(), decade, gender))
            .filter(|seed| !seed.text.is_empty())
            .cloned();
        Ok(seed)
    }
}

/// Curated seeds for the built-in parameter catalog.
///
/// Citation links point at the skbl.se biographical archive search scoped to
/// people born around the requested decade.
fn builtin_seeds() -> Vec<(&'static str, i32, GenderCategory, &'static str, &'static str)> {
    use GenderCategory::{Female, Male, Nonbinary};
    vec![
        (
            "Stockholm",
            1800,
            Male,
            "Born in 1800 in Stockholm, he grew up amid cobblestone streets and merchant \
             ships, learning a traditional craft from his father.",
            "https://skbl.se/sv/artikel/search?location=Stockholm&born_start=1780&born_end=1820",
        ),
        (
            "Stockholm",
            1900,
            Female,
            "Born in 1900 in Stockholm, she lived through suffrage reforms and the world \
             wars, eventually joining the urban workforce in offices and shops.",
            "https://skbl.se/sv/artikel/search?location=Stockholm&born_start=1880&born_end=1920",
        ),
        (
            "Stockholm",
            2000,
            Nonbinary,
            "Born in 2000 in Stockholm, they are a digital creative thriving in one of \
             Europe's most inclusive cities, blending tech work with LGBTQ+ advocacy.",
            "https://skbl.se/sv/artikel/search?location=Stockholm&born_start=1980&born_end=2020",
        ),
        (
            "Göteborg",
            1850,
            Male,
            "Born in 1850 in Göteborg, he joined the shipyards as a young man, shaping \
             iron and wood for trading vessels bound across the North Sea.",
            "https://skbl.se/sv/artikel/search?location=G%C3%B6teborg&born_start=1830&born_end=1870",
        ),
        (
            "Göteborg",
            1950,
            Female,
            "Born in 1950 in Göteborg, she studied in newly expanded schools and later \
             worked in healthcare for industrial families.",
            "https://skbl.se/sv/artikel/search?location=G%C3%B6teborg&born_start=1930&born_end=1970",
        ),
        (
            "Göteborg",
            1900,
            Nonbinary,
            "Born in 1900 in Göteborg, they navigated industrial society while forming \
             close bonds with fellow workers in the labor movement.",
            "https://skbl.se/sv/artikel/search?location=G%C3%B6teborg&born_start=1880&born_end=1920",
        ),
        (
            "Malmö",
            1850,
            Female,
            "Born in 1850 in Malmö, she supported her family by taking in laundry and \
             later by working in a textile mill.",
            "https://skbl.se/sv/artikel/search?location=Malm%C3%B6&born_start=1830&born_end=1870",
        ),
        (
            "Malmö",
            1950,
            Nonbinary,
            "Born in 1950 in Malmö, they found belonging in the city's diverse immigrant \
             communities and worked in social services.",
            "https://skbl.se/sv/artikel/search?location=Malm%C3%B6&born_start=1930&born_end=1970",
        ),
        (
            "Malmö",
            2000,
            Male,
            "Born in 2000 in Malmö, he is a multicultural gamer and entrepreneur who \
             commutes over the Öresund Bridge for work and leisure.",
            "https://skbl.se/sv/artikel/search?location=Malm%C3%B6&born_start=1980&born_end=2020",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_store_always_returns_no_seed() {
        let store = DisabledSeedStore;
        let seed = store
            .fetch_seed("Stockholm", 1900, GenderCategory::Female)
            .await
            .unwrap();
        assert!(seed.is_none());
    }

    #[tokio::test]
    async fn memory_store_matches_on_all_three_keys() {
        let store = MemorySeedStore::with_builtin_seeds();
        let hit = store
            .fetch_seed("Göteborg", 1850, GenderCategory::Male)
            .await
            .unwrap();
        assert!(hit.is_some());
        let miss = store
            .fetch_seed("Göteborg", 1850, GenderCategory::Female)
            .await
            .unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn empty_seed_text_counts_as_no_seed() {
        let mut store = MemorySeedStore::new();
        store.insert(
            "Stockholm",
            1900,
            GenderCategory::Male,
            SeedResult::new("", Some("https://example.org".to_string())),
        );
        let seed = store
            .fetch_seed("Stockholm", 1900, GenderCategory::Male)
            .await
            .unwrap();
        assert!(seed.is_none());
    }
}
