// ThingSpeak feed source implementation
use crate::application::feed_source::{FeedRequest, FeedSource, RawFeedResponse};
use crate::error::{FetchError, FetchResult};
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.thingspeak.com";

#[derive(Debug, Clone)]
pub struct ThingSpeakClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ThingSpeakClient {
    /// `timeout` of `None` leaves reqwest's default in place.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `api_key` is left off entirely for public channels.
    pub fn build_feed_url(&self, request: &FeedRequest) -> String {
        let mut url = format!(
            "{}/channels/{}/feeds.json?results={}",
            self.base_url,
            urlencoding::encode(request.channel.channel_id()),
            request.results
        );
        if let Some(key) = request.channel.read_key() {
            url.push_str("&api_key=");
            url.push_str(&urlencoding::encode(key));
        }
        url
    }
}

#[async_trait]
impl FeedSource for ThingSpeakClient {
    async fn get_feed(&self, request: &FeedRequest) -> FetchResult<RawFeedResponse> {
        let url = self.build_feed_url(request);

        tracing::debug!(
            channel = request.channel.channel_id(),
            results = request.results,
            private = request.channel.read_key().is_some(),
            "Requesting channel feed"
        );

        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Unreachable(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Unreachable(format!("failed to read body: {}", e.without_url())))?;

        Ok(RawFeedResponse::new(status, body))
    }
}
