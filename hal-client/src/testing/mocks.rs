use crate::error::TransportError;
use crate::traits::HttpTransport;
use crate::types::{HalRequest, HttpResponse};
use futures::future::BoxFuture;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

enum Reply {
    Response(HttpResponse),
    Failure(String),
}

/// Recording transport for tests.
///
/// Replies are served in the order they were queued; once the queue is empty
/// every request gets `200 OK` with `Content-Type: application/hal+json` and an
/// empty body. Clones share the queue and the recorded requests, so a test can
/// keep one clone and hand another to the client.
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<HalRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_response(self, response: HttpResponse) -> Self {
        self.push_response(response);
        self
    }

    /// Queue a transport failure, as if no response could be obtained
    #[must_use]
    pub fn with_failure<S: Into<String>>(self, message: S) -> Self {
        self.push_failure(message);
        self
    }

    pub fn push_response(&self, response: HttpResponse) {
        lock(&self.replies).push_back(Reply::Response(response));
    }

    pub fn push_failure<S: Into<String>>(&self, message: S) {
        lock(&self.replies).push_back(Reply::Failure(message.into()));
    }

    /// Every request sent so far, oldest first
    pub fn requests(&self) -> Vec<HalRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<HalRequest> {
        lock(&self.requests).last().cloned()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn reply(&self, request: HalRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(request);

        match lock(&self.replies).pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(message)) => Err(TransportError::new(message)),
            None => Ok(HttpResponse::new(200).with_header("Content-Type", "application/hal+json")),
        }
    }
}

impl HttpTransport for MockTransport {
    fn send(&self, request: HalRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
        let reply = self.reply(request);
        Box::pin(async move { reply })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
