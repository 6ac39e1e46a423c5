//! Gender identity parameters.

use serde::{Deserialize, Serialize};

/// Enumerated gender identity categories accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderCategory {
    /// Male
    #[serde(rename = "MALE")]
    Male,
    /// Female
    #[serde(rename = "FEMALE")]
    Female,
    /// Non-binary
    #[serde(rename = "NONBINARY")]
    Nonbinary,
}

impl GenderCategory {
    /// Canonical human-readable description used in prompts.
    pub fn description(&self) -> &'static str {
        match self {
            GenderCategory::Male => "Male",
            GenderCategory::Female => "Female",
            GenderCategory::Nonbinary => "Non-binary",
        }
    }

    /// All categories, in catalog order.
    pub fn all() -> [GenderCategory; 3] {
        [
            GenderCategory::Male,
            GenderCategory::Female,
            GenderCategory::Nonbinary,
        ]
    }
}

/// A gender parameter as supplied by the client: an enumerated identifier
/// plus an optional free-text description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gender {
    /// Enumerated identifier
    pub id: GenderCategory,
    /// Free-text description; empty or absent falls back to the canonical one
    #[serde(default)]
    pub description: Option<String>,
}

impl Gender {
    /// Creates a gender parameter with the canonical description.
    pub fn new(id: GenderCategory) -> Self {
        Self {
            id,
            description: Some(id.description().to_string()),
        }
    }

    /// Description embedded into prompts.
    pub fn description(&self) -> &str {
        match &self.description {
            Some(text) if !text.trim().is_empty() => text,
            _ => self.id.description(),
        }
    }
}
