// Failure taxonomy for a single feed fetch
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Inputs rejected before any network traffic.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request never produced an HTTP response (DNS, connect, TLS, timeout).
    #[error("telemetry endpoint unreachable: {0}")]
    Unreachable(String),

    /// The endpoint answered with a non-2xx status.
    #[error("telemetry endpoint returned HTTP {status}")]
    TransportFailure { status: u16 },

    /// 2xx status but the payload does not have the expected shape.
    #[error("malformed feed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Unreachable(_) => true,
            Self::TransportFailure { status } => *status == 429 || (500..600).contains(status),
            Self::InvalidRequest(_) | Self::MalformedResponse(_) => false,
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
