//! Environment configuration

use std::{env, fmt::Display, str::FromStr};
use thiserror::Error;
use tracing::info;
use crate::domain::value_objects::is_currency_code;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub nats_url: Option<String>,
    pub default_currency: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key} value `{value}`: {reason}")]
    Invalid { key: &'static str, value: String, reason: String },
}

impl Default for Config {
    fn default() -> Self {
        Self { port: 8083, nats_url: None, default_currency: "VND".to_string() }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let port = try_load(&lookup, "PORT", defaults.port)?;
        let nats_url = lookup("NATS_URL").filter(|url| !url.trim().is_empty());
        let default_currency = match lookup("DEFAULT_CURRENCY") {
            Some(raw) => parse_currency(&raw)?,
            None => {
                info!("DEFAULT_CURRENCY not set, using default: {}", defaults.default_currency);
                defaults.default_currency
            }
        };
        Ok(Self { port, nats_url, default_currency })
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid { key, value: raw.clone(), reason: e.to_string() }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn parse_currency(raw: &str) -> Result<String, ConfigError> {
    let code = raw.trim().to_uppercase();
    if !is_currency_code(&code) {
        return Err(ConfigError::Invalid { key: "DEFAULT_CURRENCY", value: raw.to_string(), reason: "expected a 3-letter currency code".into() });
    }
    Ok(code)
}
