//! bold-sdk: client for the Bold payments API
//!
//! A resilient request executor (per-attempt timeouts, cancellation,
//! exponential-backoff retries, schema-validated decoding), webhook
//! signature verification and a typed facade over the Bold REST services.
//!
//! Start from [`api::Bold`]; every failure surfaces as a [`BoldError`].

pub mod api;
pub mod config;
mod error;
pub mod executor;
pub mod http;
pub mod models;
pub mod signature;
pub mod time;

pub use error::{BoldError, ErrorKind};
