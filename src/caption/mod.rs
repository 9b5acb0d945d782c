//! HTTP transport for the caption endpoint
//!
//! The transport only performs the exchange and hands back the raw status and
//! body; deciding what a status means is left to the requester.

pub mod client;
pub mod mock;

pub use client::CaptionClient;
pub use mock::MockCaptionTransport;

use crate::models::CaptionRequest;
use crate::Result;
use async_trait::async_trait;

/// Status and text body of one request/response exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait CaptionTransport: Send + Sync {
    async fn post_caption(&self, url: &str, request: &CaptionRequest) -> Result<HttpReply>;
}
