//! Shared test utilities: an in-memory transport that records requests.

#![allow(dead_code)]

use std::collections::VecDeque;

use bankwidgets_core::{ApiClient, ApiRequest, ApiResponse, Transport, WidgetError, WidgetResult};
use parking_lot::Mutex;

/// Canned reply for one request.
pub enum Reply {
    Status(u16, String),
    NetworkDown,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Reply::Status(200, body.into())
    }

    pub fn status(status: u16) -> Self {
        Reply::Status(status, String::new())
    }
}

/// Answers requests from a queue and remembers what was sent.
///
/// Once the queue is empty every request gets `200 []`.
#[derive(Default)]
pub struct RecordingTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    pub fn with_replies(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.lock().iter().map(|r| r.url.clone()).collect()
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> WidgetResult<ApiResponse> {
        self.requests.lock().push(request);
        match self.replies.lock().pop_front() {
            Some(Reply::Status(status, body)) => Ok(ApiResponse::new(status, body)),
            Some(Reply::NetworkDown) => Err(WidgetError::Network("connection refused".to_string())),
            None => Ok(ApiResponse::new(200, "[]")),
        }
    }
}

pub fn client(replies: impl IntoIterator<Item = Reply>) -> ApiClient<RecordingTransport> {
    ApiClient::new(RecordingTransport::with_replies(replies))
}
