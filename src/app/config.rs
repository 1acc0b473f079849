use crate::core::demand::CodecSettings;
use crate::core::models::bidder::Endpoint;
use crate::core::spec::bidder::{DEFAULT_CURRENCY, DEFAULT_TTL};
use config::Config;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
#[builder(default)]
pub struct CurrencyConfig {
    /// Currency the ad server settles in, bids and floors are expressed in it
    #[builder(setter(into, strip_option))]
    pub ad_server_currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
#[builder(default)]
pub struct BidDefaults {
    /// Bid ttl in seconds when the endpoint does not send one
    pub ttl: u32,
    /// Whether ORTB bids are reported net of fees
    pub net_revenue: bool,
}

impl Default for BidDefaults {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            net_revenue: true,
        }
    }
}

fn default_integration_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(default)]
pub struct AdapterConfig {
    #[serde(default)]
    pub endpoint: Endpoint,
    #[serde(default)]
    pub currency: CurrencyConfig,
    #[serde(default)]
    pub bids: BidDefaults,
    /// Version string reported to the endpoint with every request
    #[serde(default = "default_integration_version")]
    #[builder(setter(into))]
    pub integration_version: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            currency: CurrencyConfig::default(),
            bids: BidDefaults::default(),
            integration_version: default_integration_version(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRotation {
    #[default]
    Daily,
    Hourly,
    Never,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSink {
    #[serde(flatten)]
    pub dest: LogType,
    /// Emit span open and close events
    #[serde(default = "default_true")]
    pub spans: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LogType {
    Stdout {
        #[serde(default = "default_logtype_color")]
        color: bool,
        #[serde(default)]
        json: bool,
    },
    File {
        path: PathBuf,
        #[serde(default)]
        json: bool,
        #[serde(default)]
        rotation: FileRotation,
        #[serde(default)]
        max_files: usize,
    },
}

fn default_logtype_color() -> bool {
    true
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub sinks: Vec<LogSink>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            sinks: vec![LogSink {
                dest: LogType::Stdout {
                    color: true,
                    json: false,
                },
                spans: false,
            }],
        }
    }
}

impl LoggingConfig {
    /// Validates the logging configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.sinks.is_empty() {
            anyhow::bail!("At least one logging sink must be configured");
        }

        self.level.parse::<tracing::Level>().map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: trace, debug, info, warn, error",
                self.level
            )
        })?;

        Ok(())
    }
}

impl AdapterConfig {
    pub fn load(path: &PathBuf) -> Result<AdapterConfig, anyhow::Error> {
        let cfg = Config::builder()
            .add_source(config::File::from(path.to_path_buf()))
            .build()?;

        Ok(cfg.try_deserialize()?)
    }

    /// The settlement currency, the ad server currency when configured
    pub fn currency(&self) -> &str {
        self.currency
            .ad_server_currency
            .as_deref()
            .map(str::trim)
            .filter(|cur| !cur.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
    }

    pub fn codec_settings(&self) -> CodecSettings {
        CodecSettings {
            currency: self.currency().to_string(),
            ttl: self.bids.ttl,
            net_revenue: self.bids.net_revenue,
            integration_version: self.integration_version.clone(),
        }
    }
}
