//! HTTP request handlers
//!
//! - `api` - Service info and health check endpoints
//! - `audio` - Synthesized audio download endpoint
//! - `feedback` - Feedback submission endpoint

pub mod api;
pub mod audio;
pub mod feedback;

pub use api::{HealthResponse, ServiceInfo, health_check, root};
pub use audio::download_audio;
pub use feedback::submit_feedback;
