//! Wire models for the caption endpoint
//!
//! The request carries the image as standard base64 alongside a fixed model
//! name; the response is only consulted for its `caption` field.

use crate::Result;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Model name sent with every request.
pub const CAPTION_MODEL: &str = "clip";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptionRequest {
    pub image: String,
    pub model: String,
}

impl CaptionRequest {
    /// Encode raw image bytes into a request body.
    pub fn from_image_bytes(bytes: &[u8]) -> Self {
        Self {
            image: base64::engine::general_purpose::STANDARD.encode(bytes),
            model: CAPTION_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CaptionResponse {
    #[serde(default)]
    pub caption: Option<String>,
}

impl CaptionResponse {
    /// Decode a success body. Anything other than a JSON object is rejected.
    pub fn from_body(body: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        if !value.is_object() {
            use serde::de::Error as _;
            return Err(serde_json::Error::custom(format!(
                "expected a JSON object, got `{}`",
                value
            ))
            .into());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The caption, or an empty string when the service left it out.
    pub fn caption_text(&self) -> &str {
        self.caption.as_deref().unwrap_or("")
    }
}
