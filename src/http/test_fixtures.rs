//! Scripted transport shared by executor and facade tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{HttpClient, HttpRequest, HttpResponse, TransportError};
use crate::time::Sleeper;

/// One scripted reply of the mock transport.
#[derive(Debug)]
pub enum Reply {
    /// Respond with the given response.
    Respond(HttpResponse),
    /// Fail with the given transport error.
    Fail(TransportError),
    /// Never complete (until the future is dropped).
    Hang,
}

/// Mock HTTP client that returns a configurable sequence of replies.
#[derive(Debug, Default)]
pub struct MockClient {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.captured_requests()
            .pop()
            .expect("no request was captured")
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock client ran out of scripted replies");

        match reply {
            Reply::Respond(response) => Ok(response),
            Reply::Fail(error) => Err(error),
            Reply::Hang => std::future::pending().await,
        }
    }
}

/// Convenience constructor for a response with a raw body.
pub fn respond(status: u16, body: &str) -> Reply {
    Reply::Respond(HttpResponse::new(
        http::StatusCode::from_u16(status).unwrap(),
        http::HeaderMap::new(),
        body.as_bytes().to_vec(),
    ))
}

/// Convenience constructor for a JSON response.
pub fn respond_json(status: u16, body: &serde_json::Value) -> Reply {
    Reply::Respond(HttpResponse::json(
        http::StatusCode::from_u16(status).unwrap(),
        body,
    ))
}

/// Sleeper that records requested delays and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

impl Sleeper for std::sync::Arc<RecordingSleeper> {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}
