//! Error handling and custom error types
//!
//! Every way a caption request can fail maps onto one variant here, so the
//! binary has a single exit/diagnostic path.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read image {}: {source}", .path.display())]
    ReadImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Exchange failure from a transport that is not backed by reqwest.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("caption service rejected the request (status {status})")]
    Rejected { status: u16, body: String },

    #[error("malformed caption response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Text written to stderr when a run fails.
    ///
    /// A rejected request surfaces the remote body untouched; every other
    /// failure is rendered as `error: <message>`.
    pub fn diagnostic(&self) -> String {
        match self {
            Error::Rejected { body, .. } => body.clone(),
            other => format!("error: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
