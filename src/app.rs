//! Caption request orchestration: read an image, send it, classify the reply.

use crate::caption::{CaptionClient, CaptionTransport};
use crate::config::Config;
use crate::mime::detect_image_mime;
use crate::models::{CaptionRequest, CaptionResponse};
use crate::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Highest status code still treated as success.
pub const MAX_SUCCESS_STATUS: u16 = 299;

/// Turns an image path and an endpoint URL into a caption.
pub struct CaptionRequester {
    transport: Box<dyn CaptionTransport>,
}

impl CaptionRequester {
    /// Build a requester around any transport, typically a mock in tests.
    pub fn with_transport(transport: Box<dyn CaptionTransport>) -> Self {
        Self { transport }
    }

    /// Build a requester that talks HTTP through reqwest.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::with_transport(Box::new(CaptionClient::new(config)?)))
    }

    /// Caption the image at `path` using the service at `url`.
    ///
    /// Exactly one request is sent. A status above [`MAX_SUCCESS_STATUS`]
    /// yields [`Error::Rejected`] carrying the untouched body; a success body
    /// that is not a JSON object yields [`Error::MalformedResponse`].
    pub async fn run(&self, url: &str, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await.map_err(|source| Error::ReadImage {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "Read {} bytes from {} (detected type: {})",
            bytes.len(),
            path.display(),
            detect_image_mime(&bytes).unwrap_or("unknown")
        );

        let request = CaptionRequest::from_image_bytes(&bytes);
        drop(bytes);

        let reply = self.transport.post_caption(url, &request).await?;
        if reply.status > MAX_SUCCESS_STATUS {
            debug!("Caption request rejected with status {}", reply.status);
            return Err(Error::Rejected {
                status: reply.status,
                body: reply.body,
            });
        }

        let response = CaptionResponse::from_body(&reply.body)?;
        Ok(response.caption_text().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caption::MockCaptionTransport;
    use base64::Engine as _;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn image_file(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    fn requester(transport: &MockCaptionTransport) -> CaptionRequester {
        CaptionRequester::with_transport(Box::new(transport.handle()))
    }

    #[tokio::test]
    async fn test_run_returns_caption() {
        let transport = MockCaptionTransport::new().with_reply(200, r#"{"caption": "a cat"}"#);
        let file = image_file(&[0xFF, 0xD8, 0xFF, 0xE0]);

        let caption = requester(&transport)
            .run("http://caption.test", file.path())
            .await
            .unwrap();

        assert_eq!(caption, "a cat");
        assert_eq!(transport.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_run_sends_encoded_image_and_model() {
        let transport = MockCaptionTransport::new();
        let bytes: Vec<u8> = (0..=255u8).rev().collect();
        let file = image_file(&bytes);

        requester(&transport)
            .run("http://caption.test/v1", file.path())
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let (url, request) = &requests[0];
        assert_eq!(url, "http://caption.test/v1");
        assert_eq!(request.model, "clip");
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(&request.image)
            .unwrap();
        assert_eq!(decoded, bytes);
    }

    #[tokio::test]
    async fn test_run_missing_caption_is_empty() {
        let transport = MockCaptionTransport::new().with_reply(200, "{}");
        let file = image_file(b"data");

        let caption = requester(&transport)
            .run("http://caption.test", file.path())
            .await
            .unwrap();

        assert_eq!(caption, "");
    }

    #[tokio::test]
    async fn test_status_299_is_success() {
        let transport = MockCaptionTransport::new().with_reply(299, r#"{"caption": "edge"}"#);
        let file = image_file(b"data");

        let caption = requester(&transport)
            .run("http://caption.test", file.path())
            .await
            .unwrap();

        assert_eq!(caption, "edge");
    }

    #[tokio::test]
    async fn test_status_300_is_rejected() {
        let transport = MockCaptionTransport::new().with_reply(300, r#"{"caption": "edge"}"#);
        let file = image_file(b"data");

        let err = requester(&transport)
            .run("http://caption.test", file.path())
            .await
            .unwrap_err();

        match err {
            Error::Rejected { status, body } => {
                assert_eq!(status, 300);
                assert_eq!(body, r#"{"caption": "edge"}"#);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejection_body_is_not_parsed() {
        let transport = MockCaptionTransport::new().with_reply(404, "not found");
        let file = image_file(b"data");

        let err = requester(&transport)
            .run("http://caption.test", file.path())
            .await
            .unwrap_err();

        assert_eq!(err.diagnostic(), "not found");
    }

    #[tokio::test]
    async fn test_success_with_non_json_body_is_malformed() {
        let transport = MockCaptionTransport::new().with_reply(200, "<html>ok</html>");
        let file = image_file(b"data");

        let err = requester(&transport)
            .run("http://caption.test", file.path())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_file_sends_nothing() {
        let transport = MockCaptionTransport::new();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.jpg");

        let err = requester(&transport)
            .run("http://caption.test", &missing)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ReadImage { .. }));
        assert_eq!(transport.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let transport = MockCaptionTransport::new().with_failure(true);
        let file = image_file(b"data");

        let err = requester(&transport)
            .run("http://caption.test", file.path())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(transport.get_call_count(), 1);
    }
}
