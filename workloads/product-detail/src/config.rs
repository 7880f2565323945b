//! Product page configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format (for development).
    #[default]
    Human,
    /// JSON format (for production/log aggregation).
    Json,
}

/// Product page settings. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdpConfig {
    /// Where a successful add-to-cart navigates.
    pub cart_route: String,

    /// Prefix of product image URLs.
    pub image_base_path: String,

    /// Currency used before the shopper picks one.
    pub default_currency: String,

    /// Skip add-to-cart clicks while a request is pending.
    pub guard_in_flight_add: bool,

    /// Seconds a product response is served without refetching.
    pub product_stale_secs: u64,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for PdpConfig {
    fn default() -> Self {
        Self {
            cart_route: "/cart".to_string(),
            image_base_path: "/images/products/".to_string(),
            default_currency: "USD".to_string(),
            guard_in_flight_add: false,
            product_stale_secs: 0,
            log_format: LogFormat::Human,
        }
    }
}

impl PdpConfig {
    /// Load config from a TOML file, or JSON when the path ends in `.json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            Self::from_toml(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Parse TOML config text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse JSON config text.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Stale time for product queries.
    pub fn product_stale_time(&self) -> Duration {
        Duration::from_secs(self.product_stale_secs)
    }
}
