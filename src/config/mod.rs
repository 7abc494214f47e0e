use crate::utils::error::{AppError, FieldIssue, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// UPS adapter credentials and endpoints. Sourced from the environment in
/// deployments; built directly in tests.
#[derive(Debug, Clone)]
pub struct UpsConfig {
    pub client_id: String,
    pub client_secret: String,
    pub oauth_url: String,
    pub rate_url: String,
    pub account_number: Option<String>,
    pub timeout: Duration,
}

impl UpsConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            client_id: require_env("UPS_CLIENT_ID")?,
            client_secret: require_env("UPS_CLIENT_SECRET")?,
            oauth_url: require_env("UPS_OAUTH_URL")?,
            rate_url: require_env("UPS_RATE_URL")?,
            account_number: optional_env("UPS_ACCOUNT_NUMBER"),
            timeout: parse_timeout_ms("UPS_TIMEOUT_MS", optional_env("UPS_TIMEOUT_MS"))?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_url("oauth_url", &self.oauth_url)?;
        validate_url("rate_url", &self.rate_url)?;
        Ok(())
    }
}

fn require_env(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Validation {
            message: format!("missing required environment variable: {key}"),
            issues: vec![FieldIssue::new(key, "must be set and non-empty")],
        }),
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_timeout_ms(key: &str, value: Option<String>) -> Result<Duration> {
    match value {
        None => Ok(Duration::from_millis(DEFAULT_TIMEOUT_MS)),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| AppError::Validation {
                message: format!("invalid number for environment variable: {key}"),
                issues: vec![FieldIssue::new(key, "must be a timeout in milliseconds")],
            }),
    }
}

fn validate_url(field: &str, value: &str) -> Result<()> {
    let invalid = |reason: String| AppError::Validation {
        message: format!("invalid value for {field}"),
        issues: vec![FieldIssue::new(field, reason)],
    };

    match Url::parse(value) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(format!("unsupported URL scheme: {scheme}"))),
        },
        Err(e) => Err(invalid(format!("invalid URL format: {e}"))),
    }
}
