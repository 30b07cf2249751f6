use reqwest::blocking::Client;
use tracing::{debug, info};
use url::Url;

use crate::errors::{FeedError, FeedResult};

/// Some feed servers reject unknown clients, so the request carries a
/// fixed desktop-browser user agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub struct FetchService {
    client: Client,
}

impl FetchService {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Fetch the feed body from `url`. Anything other than an
    /// http(s) URL answering with a success status is an error.
    pub fn fetch(&self, url: &str) -> FeedResult<String> {
        let parsed = Url::parse(url).map_err(|e| FeedError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FeedError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        debug!(url = %parsed, "requesting feed");
        let response = self.client.get(parsed).send()?.error_for_status()?;
        let body = response.text()?;
        info!(url, bytes = body.len(), "feed fetched");

        Ok(body)
    }
}

impl Default for FetchService {
    fn default() -> Self {
        Self::new()
    }
}
