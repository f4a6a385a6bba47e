use std::env;
use std::num::NonZeroUsize;

use reqwest::Url;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3030";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
    #[error("{var} must be a valid {expected}")]
    InvalidNumber {
        var: &'static str,
        expected: &'static str,
    },
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin; resource paths are appended to it.
    pub base_url: Url,
    pub user_agent: String,
    /// Capacity of the change-event bus shared by views.
    pub event_bus_capacity: NonZeroUsize,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("LIGHTBOX_API_URL", base_url)?,
            user_agent: default_user_agent(),
            event_bus_capacity: default_capacity(),
        })
    }

    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("LIGHTBOX_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let event_bus_capacity = match env::var("EVENT_BUS_CAPACITY") {
            Ok(raw) => parse_capacity("EVENT_BUS_CAPACITY", &raw)?,
            Err(_) => default_capacity(),
        };
        Ok(Self {
            base_url: parse_url("LIGHTBOX_API_URL", &base_url)?,
            user_agent: env::var("LIGHTBOX_USER_AGENT").unwrap_or_else(|_| default_user_agent()),
            event_bus_capacity,
        })
    }

    /// A bus sized for this configuration, to share between forms and lists.
    pub fn event_bus(&self) -> lightbox_core::events::EventBus {
        lightbox_core::events::EventBus::new(self.event_bus_capacity.get())
    }
}

fn default_capacity() -> NonZeroUsize {
    NonZeroUsize::new(lightbox_core::events::bus::DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN)
}

/// A broadcast channel needs room for at least one event.
fn parse_capacity(var: &'static str, raw: &str) -> Result<NonZeroUsize, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        expected: "positive integer",
    })
}

fn default_user_agent() -> String {
    format!("lightbox-client/{}", env!("CARGO_PKG_VERSION"))
}

fn parse_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        var,
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            var,
            reason: "not a base URL".to_string(),
        });
    }
    Ok(url)
}
