//! The resilient request executor.

use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::{AttemptSignal, RequestSpec, RetryPolicy, Schema};
use crate::BoldError;
use crate::http::{HttpClient, HttpRequest, HttpResponse, IsRetryable};
use crate::time::{Sleeper, TokioSleeper};

/// Outcome of a single attempt.
enum Step<T> {
    /// The call is over, successfully or not.
    Done(Result<T, BoldError>),
    /// The attempt failed transiently; the reason is logged.
    Retry(String),
}

/// Performs API calls with a deadline, cancellation, retries and
/// schema-validated decoding.
///
/// Holds no per-call state, so one executor can serve any number of
/// concurrent calls.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper used between retries (defaults to [`TokioSleeper`])
#[derive(Debug, Clone)]
pub struct Executor<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
}

impl<H> Executor<H, TokioSleeper> {
    /// Creates an executor over the given transport.
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
        }
    }
}

impl<H, S> Executor<H, S> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Executor<H, S2> {
        Executor {
            client: self.client,
            sleeper,
        }
    }
}

impl<H: HttpClient, S: Sleeper> Executor<H, S> {
    /// Executes the call described by `spec`.
    ///
    /// Attempts run strictly one after another. Transient failures
    /// (connection errors, retryable statuses) are retried with exponential
    /// backoff while the budget lasts; malformed or invalid success bodies
    /// are never retried.
    ///
    /// # Errors
    ///
    /// - `aborted` if the caller's token fires (before or during any attempt
    ///   or backoff)
    /// - `timeout` if an attempt exceeds `spec.timeout`
    /// - `network` for transport failures and unparsable success bodies
    /// - `http` for non-2xx responses that are not retried
    /// - `invalid_response` if the body fails the schema
    pub async fn execute<Sc: Schema>(&self, spec: RequestSpec<Sc>) -> Result<Sc::Output, BoldError> {
        let request = spec.to_http_request()?;
        let mut attempt = 0;

        loop {
            match self.attempt(&spec, &request, attempt).await {
                Step::Done(result) => return result,
                Step::Retry(reason) => {
                    let delay = spec.retry.delay_for_retry(attempt);
                    tracing::warn!(
                        url = %request.url,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        %reason,
                        "Retrying request"
                    );
                    self.backoff(delay, spec.cancellation.as_ref()).await?;
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt<Sc: Schema>(
        &self,
        spec: &RequestSpec<Sc>,
        request: &HttpRequest,
        attempt: u32,
    ) -> Step<Sc::Output> {
        let signal = AttemptSignal::new(spec.timeout, spec.cancellation.as_ref());
        if let Some(cause) = signal.cause() {
            return Step::Done(Err(cause.into_error(spec.timeout)));
        }

        tracing::debug!(method = %request.method, url = %request.url, attempt, "Sending request");

        let outcome = signal.guard(self.client.request(request.clone())).await;
        let may_retry = spec.retry.should_retry(attempt);

        match outcome {
            Err(cause) => Step::Done(Err(cause.into_error(spec.timeout))),
            Ok(Err(error)) if error.is_retryable() && may_retry => Step::Retry(error.to_string()),
            Ok(Err(error)) => {
                tracing::debug!(url = %request.url, attempt, %error, "Request failed");
                Step::Done(Err(BoldError::network_with_cause(error.to_string(), error)))
            }
            Ok(Ok(response)) if response.is_success() => {
                Step::Done(decode(&response, &spec.schema))
            }
            Ok(Ok(response)) if RetryPolicy::is_retryable_status(response.status) && may_retry => {
                Step::Retry(format!("HTTP {}", response.status.as_u16()))
            }
            Ok(Ok(response)) => {
                tracing::debug!(url = %request.url, status = response.status.as_u16(), "Request rejected");
                Step::Done(Err(http_error(&response)))
            }
        }
    }

    /// Waits before the next attempt, giving up if the caller cancels.
    async fn backoff(
        &self,
        delay: Duration,
        cancellation: Option<&CancellationToken>,
    ) -> Result<(), BoldError> {
        let Some(token) = cancellation else {
            self.sleeper.sleep(delay).await;
            return Ok(());
        };

        tokio::select! {
            biased;
            () = token.cancelled() => Err(BoldError::aborted()),
            () = self.sleeper.sleep(delay) => Ok(()),
        }
    }
}

/// Parses a 2xx body as JSON and validates it against the schema.
fn decode<Sc: Schema>(response: &HttpResponse, schema: &Sc) -> Result<Sc::Output, BoldError> {
    let raw: Value = serde_json::from_slice(&response.body)
        .map_err(|e| BoldError::network_with_cause("Failed to parse JSON response", e))?;

    match schema.validate(&raw) {
        Ok(value) => Ok(value),
        Err(issues) => Err(BoldError::InvalidResponse { issues, raw }),
    }
}

/// Builds the `http` error for a rejected response.
///
/// The body is kept as JSON when it parses, else as text, else `null`.
fn http_error(response: &HttpResponse) -> BoldError {
    let body = serde_json::from_slice(&response.body).unwrap_or_else(|_| {
        response
            .body_text()
            .map_or(Value::Null, |text| Value::String(text.to_string()))
    });

    BoldError::Http {
        status: response.status,
        status_text: response.status_text().to_string(),
        body,
    }
}
