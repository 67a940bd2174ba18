//! Transport-only client primitives for the career-coach HTTP API.
//!
//! This crate owns request/response building and parsing for the coaching
//! endpoints only. It intentionally contains no conversation state and no UI
//! coupling: callers hand it typed payloads and receive the single response
//! field each endpoint is contracted to produce.
//!
//! Every call is a single attempt. There are no retries, no timeouts unless
//! configured, and no cancellation; callers must not assume idempotence.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod response;
pub mod url;

pub use client::CoachApiClient;
pub use config::CoachApiConfig;
pub use error::CoachApiError;
pub use payload::{ChatRequest, JobAnalysisRequest, JobFilters, MatchRequest, PdfUpload};
pub use response::Job;
pub use url::{normalize_api_url, Endpoint};
