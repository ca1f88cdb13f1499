use crate::application::telemetry_service::FetchPolicy;
use crate::domain::channel::ChannelRef;
use crate::domain::feed::FieldName;
use crate::domain::telemetry::FieldBinding;
use crate::infrastructure::thingspeak_client::DEFAULT_BASE_URL;
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

const ENV_PREFIX: &str = "THINGSPEAK";

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub channel: ChannelSettings,
    #[serde(default)]
    pub client: ClientSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChannelSettings {
    pub id: String,
    #[serde(default)]
    pub read_api_key: String,
    #[serde(default = "default_results")]
    pub results: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FieldsConfig {
    #[serde(default)]
    pub fields: Vec<FieldBindingConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FieldBindingConfig {
    pub field: String,
    pub title: String,
    pub unit: String,
    pub color: Option<String>,
}

fn default_results() -> u32 {
    100
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            max_retries: 0,
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl ChannelSettings {
    pub fn channel_ref(&self) -> anyhow::Result<ChannelRef> {
        ChannelRef::new(self.id.clone(), Some(self.read_api_key.clone()))
            .context("Invalid channel configuration")
    }
}

impl ClientSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            max_retries: self.max_retries,
            retry_backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }
}

impl FieldBindingConfig {
    pub fn to_binding(&self) -> anyhow::Result<FieldBinding> {
        let field: FieldName = self
            .field
            .parse()
            .with_context(|| format!("Invalid field binding for '{}'", self.title))?;

        Ok(FieldBinding {
            field,
            title: self.title.clone(),
            unit: self.unit.clone(),
            color: self.color.clone(),
        })
    }
}

impl FieldsConfig {
    /// Configured bindings, or the built-in ones when the file lists none.
    pub fn bindings(&self) -> anyhow::Result<Vec<FieldBinding>> {
        if self.fields.is_empty() {
            return Ok(FieldBinding::defaults());
        }
        self.fields.iter().map(FieldBindingConfig::to_binding).collect()
    }
}

/// Load `config/thingspeak.*`, overridden by `THINGSPEAK__SECTION__KEY` variables.
pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/thingspeak").required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    settings
        .try_deserialize()
        .context("Failed to read service configuration")
}

pub fn load_fields_config() -> anyhow::Result<FieldsConfig> {
    read_fields_config(config::File::with_name("config/fields").required(false))
}

fn read_fields_config<S>(source: S) -> anyhow::Result<FieldsConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .add_source(source)
        .build()
        .context("Failed to load field bindings")?;

    settings
        .try_deserialize()
        .context("Failed to read field bindings")
}
