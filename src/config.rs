use std::env::var;
use std::time::Duration;

use dotenvy::dotenv;
use thiserror::Error;

use crate::application::services::retry::{RetryBudget, RetryConfig};

const WHATSAPP_SUFFIX: &str = "@s.whatsapp.net";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    Missing(&'static str),
    #[error("environment variable {key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub recipient_number: String,
    pub sender_number: Option<String>,
    pub verify_token: String,
    pub messenger_url: String,
    pub messenger_timeout: Option<Duration>,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub retry: RetryConfig,
}

impl Config {
    pub fn try_parse() -> Result<Config, ConfigError> {
        let _ = dotenv();
        Self::from_lookup(|key| var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup so that parsing
    /// can be exercised without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let recipient = required("RECIPIENT_NUMBER")?;
        let verify_token = required("VERIFY_TOKEN")?;

        let retry = RetryConfig {
            base_interval: Duration::from_secs(parse_or(
                get("RETRY_BASE_INTERVAL_SECS"),
                "RETRY_BASE_INTERVAL_SECS",
                10,
            )?),
            max_rounds: parse_or(get("RETRY_MAX_ROUNDS"), "RETRY_MAX_ROUNDS", 5)?,
            budget: match get("RETRY_BUDGET") {
                None => RetryBudget::Global,
                Some(value) => RetryBudget::from_str(&value).ok_or_else(|| ConfigError::Invalid {
                    key: "RETRY_BUDGET",
                    reason: format!("expected `global` or `per_notification`, got `{value}`"),
                })?,
            },
        };

        Ok(Config {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(get("PORT"), "PORT", 5000)?,
            recipient_number: format!("{recipient}{WHATSAPP_SUFFIX}"),
            sender_number: get("SENDER_NUMBER"),
            verify_token,
            messenger_url: get("MESSENGER_URL")
                .unwrap_or_else(|| "http://localhost:6000/send-message".to_string()),
            messenger_timeout: get("MESSENGER_TIMEOUT_SECS")
                .map(|value| parse_value::<u64>(&value, "MESSENGER_TIMEOUT_SECS"))
                .transpose()?
                .map(Duration::from_secs),
            database_url: get("DATABASE_URL"),
            db_max_connections: parse_or(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 5)?,
            retry,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(value) => parse_value(&value, key),
        None => Ok(default),
    }
}

fn parse_value<T>(value: &str, key: &'static str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|err| ConfigError::Invalid {
        key,
        reason: err.to_string(),
    })
}
