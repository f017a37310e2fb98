//! Per-attempt cancellation: the request deadline composed with the
//! caller's cancellation token.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::BoldError;

/// Which source aborted an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortCause {
    /// The caller's cancellation token fired.
    Cancelled,
    /// The attempt deadline elapsed.
    Deadline,
}

impl AbortCause {
    /// Converts the cause into the matching public error.
    #[must_use]
    pub fn into_error(self, timeout: Duration) -> BoldError {
        match self {
            Self::Cancelled => BoldError::aborted(),
            Self::Deadline => BoldError::timeout(timeout),
        }
    }
}

/// Composed abort signal for one attempt.
///
/// The inner token is a child of the caller's token (if any), so it fires
/// when the caller cancels, and it is cancelled directly when the deadline
/// elapses. The cause is read back from the caller's token: if that one is
/// cancelled the attempt was aborted, otherwise it timed out.
///
/// Dropping the signal drops the deadline timer and detaches the child
/// token from its parent.
#[derive(Debug)]
pub struct AttemptSignal {
    token: CancellationToken,
    external: Option<CancellationToken>,
    timeout: Duration,
}

impl AttemptSignal {
    /// Creates the signal for an attempt bounded by `timeout`.
    #[must_use]
    pub fn new(timeout: Duration, external: Option<&CancellationToken>) -> Self {
        let token = external.map_or_else(CancellationToken::new, CancellationToken::child_token);
        Self {
            token,
            external: external.cloned(),
            timeout,
        }
    }

    /// The composed token; cancelled when either source fires.
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns why the composed token fired, or `None` while it has not.
    #[must_use]
    pub fn cause(&self) -> Option<AbortCause> {
        if !self.token.is_cancelled() {
            return None;
        }
        let cancelled = self
            .external
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled);
        Some(if cancelled {
            AbortCause::Cancelled
        } else {
            AbortCause::Deadline
        })
    }

    /// Drives `fut` until it completes or the signal fires.
    ///
    /// `fut` is never polled if the signal has already fired, and it is
    /// dropped (cancelling the in-flight work) as soon as the signal fires.
    ///
    /// # Errors
    ///
    /// Returns the [`AbortCause`] when the signal fires first.
    pub async fn guard<F: Future>(&self, fut: F) -> Result<F::Output, AbortCause> {
        if let Some(cause) = self.cause() {
            return Err(cause);
        }

        tokio::select! {
            biased;
            () = self.token.cancelled() => {}
            () = tokio::time::sleep(self.timeout) => self.token.cancel(),
            output = fut => return Ok(output),
        }

        Err(self.cause().unwrap_or(AbortCause::Deadline))
    }
}
