//! Seed store error types.
//!
//! A seed lookup that finds nothing is `Ok(None)`, never one of these. This
//! error marks an infrastructure failure in the store itself and must not be
//! degraded to "no seed".

/// Seed store infrastructure error with source location.
#[derive(Debug, Clone)]
pub struct SeedStoreError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl SeedStoreError {
    /// Create a new SeedStoreError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use storywheel_error::SeedStoreError;
    ///
    /// let err = SeedStoreError::new("store query failed");
    /// assert!(err.message.contains("query failed"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for SeedStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Seed Store Error: {} at line {} in {}",
            self.message, self.line, self.file
        )
    }
}

impl std::error::Error for SeedStoreError {}
