// Telemetry service - Use case for fetching a normalized channel feed
use crate::application::feed_source::{FeedRequest, FeedSource};
use crate::application::normalizer::parse_feed_body;
use crate::domain::channel::ChannelRef;
use crate::domain::feed::TelemetryDataset;
use crate::error::{FetchError, FetchResult};
use std::sync::Arc;
use std::time::{Duration, Instant};

const BODY_PREVIEW_CHARS: usize = 500;

/// Retry behaviour for a fetch. The default is a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    pub max_retries: u32,
    pub retry_backoff: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

impl FetchPolicy {
    /// Delay before retry number `attempt + 1`, doubling each time.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.retry_backoff.saturating_mul(1u32 << attempt.min(16))
    }
}

#[derive(Clone)]
pub struct TelemetryService {
    source: Arc<dyn FeedSource>,
    policy: FetchPolicy,
}

impl TelemetryService {
    pub fn new(source: Arc<dyn FeedSource>, policy: FetchPolicy) -> Self {
        Self { source, policy }
    }

    /// Fetch up to `result_count` records from the channel.
    ///
    /// An empty feed is a successful, empty dataset. Each call is independent: nothing is
    /// cached between invocations.
    pub async fn fetch(
        &self,
        channel: &ChannelRef,
        result_count: u32,
    ) -> FetchResult<TelemetryDataset> {
        if result_count == 0 {
            return Err(FetchError::InvalidRequest(
                "result count must be positive".to_string(),
            ));
        }

        let request = FeedRequest::new(channel.clone(), result_count);
        let mut attempt = 0;

        loop {
            match self.fetch_once(&request).await {
                Err(e) if e.is_retryable() && attempt < self.policy.max_retries => {
                    let delay = self.policy.backoff_for(attempt);
                    tracing::warn!(
                        channel = request.channel.channel_id(),
                        attempt = attempt + 1,
                        max_retries = self.policy.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Feed fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn fetch_once(&self, request: &FeedRequest) -> FetchResult<TelemetryDataset> {
        let start_time = Instant::now();
        let response = self.source.get_feed(request).await?;

        if !response.is_success() {
            tracing::warn!(
                channel = request.channel.channel_id(),
                status = response.status,
                "Feed request returned non-success status"
            );
            return Err(FetchError::TransportFailure {
                status: response.status,
            });
        }

        let dataset = parse_feed_body(&response.body, request.results as usize).map_err(|e| {
            tracing::error!(
                channel = request.channel.channel_id(),
                error = %e,
                body_preview = %response.body.chars().take(BODY_PREVIEW_CHARS).collect::<String>(),
                "Failed to normalize feed response"
            );
            e
        })?;

        tracing::debug!(
            channel = request.channel.channel_id(),
            records = dataset.len(),
            reported_fields = dataset.reported_fields().len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Fetched channel feed"
        );

        Ok(dataset)
    }
}
