//! Remote SDG classification: pacing, HTTP call, normalization
//!
//! The classifier endpoint scores text against the 17 UN Sustainable
//! Development Goals. This module owns the outbound side of that contract:
//! - a single-slot rate limiter spacing actual dispatches
//! - the HTTP client performing exactly one POST per call, no retries
//! - normalization of the goal-indexed response into a stable shape

pub mod client;
pub mod config;
pub mod models;
pub mod rate_limiter;

pub use client::{ClassifierClient, ClassifyError};
pub use config::ClassifierConfig;
pub use models::{
    goal_name, ClassificationResult, ClassifyReply, Prediction, SDG_GOAL_NAMES,
};
pub use rate_limiter::{RateLimiter, RateLimiterConfig};
