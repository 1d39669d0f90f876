use serde::{Deserialize, Serialize};
use std::env;
use std::ops::RangeInclusive;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

/// Base URLs of the two services this gateway forwards to.
///
/// Both are stored without a trailing slash so request paths can be appended directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub delivery_url: String,
    pub submit_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub moderator_email: String,
    #[serde(skip_serializing)]
    pub moderator_password: String,
    /// Empty means any origin in development and no cross-origin access otherwise.
    pub cors_origins: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid URL in {var}: {message}")]
    InvalidUrl { var: &'static str, message: String },
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

const DEVELOPMENT_JWT_SECRET: &str = "development-only-secret";

/// Token lifetimes are capped at one year.
pub const MAX_JWT_EXPIRY_HOURS: u64 = 24 * 365;

impl UpstreamConfig {
    pub fn new(delivery_url: &str, submit_url: &str, timeout_secs: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            delivery_url: normalize_base_url("DELIVERY_SERVICE_URL", delivery_url)?,
            submit_url: normalize_base_url("SUBMIT_SERVICE_URL", submit_url)?,
            timeout_secs,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let required = |var: &'static str| -> Result<String, ConfigError> {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let upstream = UpstreamConfig::new(
            &required("DELIVERY_SERVICE_URL")?,
            &required("SUBMIT_SERVICE_URL")?,
            default_timeout_secs(environment),
        )?;

        let jwt_secret = match required("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if environment == Environment::Development => {
                tracing::warn!("JWT_SECRET not set, using the development fallback secret");
                DEVELOPMENT_JWT_SECRET.to_string()
            }
            Err(e) => return Err(e),
        };

        let security = SecurityConfig {
            jwt_secret,
            jwt_expiry_hours: 24,
            moderator_email: required("MODERATOR_EMAIL")?,
            moderator_password: required("MODERATOR_PASSWORD")?,
            cors_origins: Vec::new(),
        };

        let mut config = Self::build(environment, upstream, security);

        if let Some(v) = lookup("PORT") {
            config.server.port = parse_var("PORT", &v)?;
        }
        if let Some(v) = lookup("UPSTREAM_TIMEOUT_SECS") {
            config.upstream.timeout_secs = parse_in_range("UPSTREAM_TIMEOUT_SECS", &v, 1..=u64::MAX)?;
        }
        if let Some(v) = lookup("JWT_EXPIRY_HOURS") {
            config.security.jwt_expiry_hours = parse_in_range("JWT_EXPIRY_HOURS", &v, 1..=MAX_JWT_EXPIRY_HOURS)?;
        }
        if let Some(v) = lookup("CORS_ORIGINS") {
            config.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(config)
    }

    /// Development profile around the given upstreams and operator credentials.
    pub fn development(upstream: UpstreamConfig, security: SecurityConfig) -> Self {
        Self::build(Environment::Development, upstream, security)
    }

    fn build(environment: Environment, upstream: UpstreamConfig, security: SecurityConfig) -> Self {
        Self {
            environment,
            server: ServerConfig { port: 3004 },
            upstream,
            security,
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn default_timeout_secs(environment: Environment) -> u64 {
    match environment {
        Environment::Development => 30,
        Environment::Staging => 15,
        Environment::Production => 10,
    }
}

fn normalize_base_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        var,
        message: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            var,
            message: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    })
}

fn parse_in_range(var: &'static str, value: &str, range: RangeInclusive<u64>) -> Result<u64, ConfigError> {
    let parsed: u64 = parse_var(var, value)?;
    if !range.contains(&parsed) {
        return Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        });
    }
    Ok(parsed)
}
