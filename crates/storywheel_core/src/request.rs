//! Story generation request types.

use crate::Gender;
use serde::{Deserialize, Serialize};
use storywheel_error::ValidationError;

/// Parameters for one generated life story.
///
/// All three fields are required before any remote call is made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinRequest {
    /// City the story is set in
    pub city: String,
    /// Decade the story is set around (e.g. 1950)
    pub decade: i32,
    /// Gender identity of the protagonist
    pub gender: Gender,
}

impl SpinRequest {
    /// Creates a request from its three parameters.
    pub fn new(city: impl Into<String>, decade: i32, gender: Gender) -> Self {
        Self {
            city: city.into(),
            decade,
            gender,
        }
    }

    /// Checks the request invariant: city present and non-blank.
    ///
    /// The gender identifier is enforced at deserialization time, so the
    /// only field that can arrive structurally valid but unusable is the
    /// city string.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.city.trim().is_empty() {
            return Err(ValidationError::new("city, decade and gender are required"));
        }
        Ok(())
    }
}

/// Pairs two independent story requests for the comparison flow.
///
/// Both sub-requests must validate or the whole request is rejected before
/// any remote call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareRequest {
    /// Parameters for the first story
    pub first: SpinRequest,
    /// Parameters for the second story
    pub second: SpinRequest,
}

impl CompareRequest {
    /// Validates both sub-requests.
    ///
    /// # Errors
    ///
    /// Returns the first sub-request's [`ValidationError`] if either fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.first.validate()?;
        self.second.validate()
    }
}
