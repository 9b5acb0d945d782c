use super::{CaptionTransport, HttpReply};
use crate::models::CaptionRequest;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Canned transport used in tests. Replies are handed out in order and cycle
/// once exhausted; with no replies configured it answers `200 {}`.
pub struct MockCaptionTransport {
    replies: Arc<Mutex<Vec<HttpReply>>>,
    requests: Arc<Mutex<Vec<(String, CaptionRequest)>>>,
    call_count: Arc<Mutex<usize>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockCaptionTransport {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_reply(self, status: u16, body: &str) -> Self {
        self.replies.lock().unwrap().push(HttpReply::new(status, body));
        self
    }

    /// Make every call fail as if the endpoint were unreachable.
    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Every `(url, request)` pair received so far.
    pub fn requests(&self) -> Vec<(String, CaptionRequest)> {
        self.requests.lock().unwrap().clone()
    }

    /// Share recorded state with a clone that can be boxed into a requester.
    pub fn handle(&self) -> Self {
        Self {
            replies: Arc::clone(&self.replies),
            requests: Arc::clone(&self.requests),
            call_count: Arc::clone(&self.call_count),
            should_fail: Arc::clone(&self.should_fail),
        }
    }
}

impl Default for MockCaptionTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptionTransport for MockCaptionTransport {
    async fn post_caption(&self, url: &str, request: &CaptionRequest) -> Result<HttpReply> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), request.clone()));

        if *self.should_fail.lock().unwrap() {
            return Err(Error::Transport(format!("mock transport failure for {}", url)));
        }

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            Ok(HttpReply::new(200, "{}"))
        } else {
            let index = (*count - 1) % replies.len();
            Ok(replies[index].clone())
        }
    }
}
