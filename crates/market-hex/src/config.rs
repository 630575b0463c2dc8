use std::env;
use std::num::NonZeroUsize;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::application::pipeline::window::DEFAULT_PAGE_SIZE;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Option<Duration>,
    pub page_size: NonZeroUsize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source (the process env in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_base_url = lookup("MARKET_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let request_timeout = lookup("MARKET_REQUEST_TIMEOUT_SECS")
            .map(|raw| raw.trim().parse::<u64>())
            .transpose()
            .context("MARKET_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?
            .map(Duration::from_secs);
        let page_size = lookup("MARKET_PAGE_SIZE")
            .map(|raw| raw.trim().parse::<NonZeroUsize>())
            .transpose()
            .context("MARKET_PAGE_SIZE must be a positive integer")?
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Ok(Self {
            api_base_url,
            request_timeout,
            page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.page_size.get(), 10);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("MARKET_API_URL", "http://api.local:8080"),
            ("MARKET_REQUEST_TIMEOUT_SECS", "5"),
            ("MARKET_PAGE_SIZE", "20"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "http://api.local:8080");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.page_size.get(), 20);
    }

    #[test]
    fn rejects_zero_page_size() {
        assert!(Config::from_lookup(lookup(&[("MARKET_PAGE_SIZE", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("MARKET_REQUEST_TIMEOUT_SECS", "soon")])).is_err());
    }
}
