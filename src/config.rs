//! Environment-driven configuration.
//!
//! Values are read from the process environment after loading `.env`.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::messaging::{TelegramConfig, DEFAULT_API_BASE};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_PRODUCTS_FILE: &str = "products.csv";
const DEFAULT_VEHICLES_FILE: &str = "vehicles.csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: expected {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Base directory for relative catalog paths.
    pub data_dir: PathBuf,
    pub products_file: PathBuf,
    pub vehicles_file: PathBuf,
    pub catalog_cache_enabled: bool,
    pub telegram: Option<TelegramConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = get("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let telegram = get("TELEGRAM_BOT_TOKEN").map(|bot_token| TelegramConfig {
            bot_token,
            default_chat_id: get("TELEGRAM_CHAT_ID"),
            api_base: get("TELEGRAM_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        });
        if telegram.is_none() {
            log::warn!("TELEGRAM_BOT_TOKEN not set, send_message tool will be unavailable");
        }

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT, "a port number")?,
            data_dir,
            products_file: get("PRODUCTS_FILE")
                .unwrap_or_else(|| DEFAULT_PRODUCTS_FILE.to_string())
                .into(),
            vehicles_file: get("VEHICLES_FILE")
                .unwrap_or_else(|| DEFAULT_VEHICLES_FILE.to_string())
                .into(),
            catalog_cache_enabled: parse_bool(
                "CATALOG_CACHE_ENABLED",
                get("CATALOG_CACHE_ENABLED"),
                true,
            )?,
            telegram,
        })
    }
}

/// `data/` next to the crate manifest, independent of the working directory.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn parse_or<T: FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw,
            expected,
        }),
    }
}

fn parse_bool(key: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(_) => Err(ConfigError::Invalid {
            key,
            value: value.unwrap_or_default(),
            expected: "a boolean",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.data_dir, default_data_dir());
        assert_eq!(config.products_file, PathBuf::from("products.csv"));
        assert!(config.catalog_cache_enabled);
        assert!(config.telegram.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9090"),
            ("DATA_DIR", "/srv/catalogs"),
            ("CATALOG_CACHE_ENABLED", "off"),
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "-100500"),
        ])
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.data_dir, PathBuf::from("/srv/catalogs"));
        assert!(!config.catalog_cache_enabled);
        let telegram = config.telegram.unwrap();
        assert_eq!(telegram.default_chat_id.as_deref(), Some("-100500"));
        assert_eq!(telegram.api_base, "https://api.telegram.org");
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_invalid_bool() {
        assert!(config_from(&[("CATALOG_CACHE_ENABLED", "maybe")]).is_err());
    }
}
