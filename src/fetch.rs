use std::time::Duration;

use rand::Rng;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::Error;

/// Browser-style header profiles. One is picked per fetcher at construction
/// time, so concurrent fetchers can present different profiles without any
/// process-global state.
const HEADER_PROFILES: &[&[(&str, &str)]] = &[
    &[
        ("DNT", "1"),
        (
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
        (
            "User-Agent",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_6) AppleWebKit/603.3.4 (KHTML, like Gecko) Version/10.1.2 Safari/603.3.4",
        ),
        ("Upgrade-Insecure-Requests", "1"),
        ("Accept-Language", "en-au"),
    ],
    &[
        (
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8",
        ),
        ("Accept-Language", "en-AU,en;q=0.8,en-US;q=0.6"),
        (
            "User-Agent",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_6) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/61.0.3163.79 Safari/537.36",
        ),
        ("Upgrade-Insecure-Requests", "1"),
    ],
];

/// Content types accepted from a 200 response. Anything else is rejected as a
/// non-text payload.
const TEXT_CONTENT_TYPES: &[&str] = &[
    "application/xml",
    "application/json",
    "application/rss+xml",
    "application/atom+xml",
    "text/html",
    "text/json",
    "text/plain",
    "text/xml",
];

/// Timeouts and transport settings for a [`Fetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(8),
            request_timeout: Duration::from_secs(16),
        }
    }
}

/// HTTP fetcher with a cookie jar, fixed timeouts, and a header profile
/// chosen at construction.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    headers: &'static [(&'static str, &'static str)],
}

impl Fetcher {
    /// Build a fetcher from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the underlying client cannot be built.
    pub fn new(config: &FetchConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .cookie_store(true)
            .build()?;
        let profile = rand::thread_rng().gen_range(0..HEADER_PROFILES.len());
        Ok(Self {
            client,
            headers: HEADER_PROFILES[profile],
        })
    }

    /// Fetch a URL, returning the trimmed body.
    ///
    /// # Errors
    ///
    /// Fails on transport errors and on 200 responses whose content type is
    /// not in the text allow-list.
    pub async fn get(&self, url: &str) -> Result<String, Error> {
        let mut request = self.client.get(url);
        for (name, value) in self.headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        debug!(%status, %content_type, "fetched url");

        if status == StatusCode::OK && !is_text_content(&content_type) {
            return Err(Error::NonTextResponse(content_type));
        }

        let body = response.text().await?;
        Ok(body.trim().to_owned())
    }

    /// Upload raw bytes to a URL with a POST, returning the trimmed body.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Fetcher::get`].
    pub async fn post(&self, url: &str, body: Vec<u8>) -> Result<String, Error> {
        let mut request = self.client.post(url).body(body);
        for (name, value) in self.headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        debug!(%status, %content_type, "posted to url");

        if status == StatusCode::OK && !is_text_content(&content_type) {
            return Err(Error::NonTextResponse(content_type));
        }

        let body = response.text().await?;
        Ok(body.trim().to_owned())
    }
}

fn is_text_content(content_type: &str) -> bool {
    TEXT_CONTENT_TYPES
        .iter()
        .any(|prefix| content_type.starts_with(prefix))
}
