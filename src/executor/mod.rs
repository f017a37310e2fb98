//! Resilient request execution.
//!
//! This module provides:
//! - Call descriptions ([`RequestSpec`], [`RequestBody`], [`ContentKind`])
//! - Retry configuration ([`RetryPolicy`])
//! - Per-attempt deadline/cancellation composition ([`AttemptSignal`])
//! - Response validation ([`Schema`], [`JsonSchema`], [`Issue`])
//! - The executor itself ([`Executor`])

mod abort;
mod execute;
mod request;
mod retry;
mod schema;


pub use abort::{AbortCause, AttemptSignal};
pub use execute::Executor;
pub use request::{ContentKind, IDEMPOTENCY_KEY, RequestBody, RequestSpec};
pub use retry::{RETRYABLE_STATUSES, RetryPolicy};
pub use schema::{Issue, JsonSchema, Schema};
