//! HTTP surface and generation orchestration for Storywheel.
//!
//! `relay` owns the client-facing event channel, `spin` composes seed
//! resolution, prompt building, and the provider clients into the three
//! generation flows, and `api` exposes them over axum.

mod api;
mod error;
mod relay;
mod spin;

pub use api::create_router;
pub use error::ApiError;
pub use relay::{OpenRelay, StreamRelay};
pub use spin::SpinService;
