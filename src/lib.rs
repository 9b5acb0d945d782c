//! Image captioning client for a remote clip model
//!
//! Reads an image from disk, posts it base64-encoded as JSON to a caption
//! endpoint, and returns the caption the service produced.

pub mod app;
pub mod caption;
pub mod config;
pub mod error;
pub mod mime;
pub mod models;

pub use error::{Error, Result};
