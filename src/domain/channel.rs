// Channel domain model
use crate::error::{FetchError, FetchResult};

/// Identifies a remote channel and the optional key needed to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRef {
    channel_id: String,
    read_key: Option<String>,
}

impl ChannelRef {
    /// An empty `read_key` means a public channel and is stored as `None`.
    pub fn new(channel_id: impl Into<String>, read_key: Option<String>) -> FetchResult<Self> {
        let channel_id = channel_id.into().trim().to_string();
        if channel_id.is_empty() {
            return Err(FetchError::InvalidRequest(
                "channel id must not be empty".to_string(),
            ));
        }

        let read_key = read_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Self {
            channel_id,
            read_key,
        })
    }

    pub fn public(channel_id: impl Into<String>) -> FetchResult<Self> {
        Self::new(channel_id, None)
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn read_key(&self) -> Option<&str> {
        self.read_key.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_public() {
        let channel = ChannelRef::new("12397", Some(String::new())).unwrap();
        assert_eq!(channel.read_key(), None);

        let channel = ChannelRef::new("12397", Some("  ".to_string())).unwrap();
        assert_eq!(channel.read_key(), None);

        let channel = ChannelRef::new("12397", Some("XYZ123".to_string())).unwrap();
        assert_eq!(channel.read_key(), Some("XYZ123"));
    }

    #[test]
    fn test_empty_channel_id_rejected() {
        assert!(matches!(
            ChannelRef::public(""),
            Err(FetchError::InvalidRequest(_))
        ));
        assert!(matches!(
            ChannelRef::public("   "),
            Err(FetchError::InvalidRequest(_))
        ));
    }
}
