//! Error types for the Storywheel generation service.
//!
//! Each error carries the source location where it was constructed so that
//! log lines point back at the failing call site without a backtrace.

mod config;
mod relay;
mod seed;
mod validation;

pub use config::ConfigError;
pub use relay::RelayError;
pub use seed::SeedStoreError;
pub use validation::ValidationError;
