use super::{CaptionTransport, HttpReply};
use crate::config::Config;
use crate::models::CaptionRequest;
use crate::Result;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;

/// reqwest-backed transport. One POST per call, no retries.
pub struct CaptionClient {
    client: Client,
}

impl CaptionClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::new_with_client(builder.build()?))
    }

    pub fn new_with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CaptionTransport for CaptionClient {
    async fn post_caption(&self, url: &str, request: &CaptionRequest) -> Result<HttpReply> {
        tracing::debug!("Sending caption request to {}", url);

        // `.json()` sets Content-Type: application/json
        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("Caption request to {} failed: {}", url, e);
                e
            })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(
            "Caption service answered with status {} ({} bytes)",
            status,
            body.len()
        );

        Ok(HttpReply { status, body })
    }
}
