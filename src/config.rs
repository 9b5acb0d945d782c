//! Optional runtime configuration
//!
//! The two positional arguments are the only required input. Everything here
//! has a default that reproduces the plain contract.

use crate::{Error, Result};
use std::time::Duration;

pub const TIMEOUT_ENV: &str = "CAPTION_TIMEOUT_SECS";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Total request timeout. `None` waits for the server indefinitely.
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout = match lookup(TIMEOUT_ENV) {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        Ok(Self { timeout })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        Error::Config(format!(
            "{} must be a positive number of seconds, got '{}'",
            TIMEOUT_ENV, raw
        ))
    })?;
    if secs == 0 {
        return Err(Error::Config(format!("{} must be greater than zero", TIMEOUT_ENV)));
    }
    Ok(Duration::from_secs(secs))
}
