// Feed source trait for raw channel feed access
use crate::domain::channel::ChannelRef;
use crate::error::FetchResult;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub channel: ChannelRef,
    pub results: u32,
}

impl FeedRequest {
    pub fn new(channel: ChannelRef, results: u32) -> Self {
        Self { channel, results }
    }
}

/// Status and body exactly as the endpoint returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFeedResponse {
    pub status: u16,
    pub body: String,
}

impl RawFeedResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Issue one request for the channel feed.
    ///
    /// Any HTTP response, including error statuses, is returned as `Ok`; only failures
    /// that produced no response at all are `FetchError::Unreachable`.
    async fn get_feed(&self, request: &FeedRequest) -> FetchResult<RawFeedResponse>;
}
