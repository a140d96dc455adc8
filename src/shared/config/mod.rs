//! Server configuration
//!
//! `ServerConfig` is read once at startup from the process environment
//! (after `.env` has been loaded) and then shared read-only through
//! `AppState`. Tests build it directly with [`ServerConfig::builder`].

use std::time::Duration;
use thiserror::Error;

/// Secret used when `JWT_SECRET` is unset in a debug build
const DEV_JWT_SECRET: &str = "regain-dev-secret-change-me";

/// Lowest bcrypt work factor the hasher accepts
pub const MIN_BCRYPT_COST: u32 = 4;

/// Highest bcrypt work factor the hasher accepts
pub const MAX_BCRYPT_COST: u32 = 31;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// sqlx connection string for the SQLite database
    pub database_url: String,
    /// HMAC secret for signing session tokens
    pub jwt_secret: String,
    /// Lifetime of an issued session token
    pub token_ttl: Duration,
    /// TCP port the HTTP server binds to
    pub port: u16,
    /// Origins allowed to call the API with credentials
    pub cors_origins: Vec<String>,
    /// Add `Secure` to the session cookie
    pub cookie_secure: bool,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
    /// Radius used when a proximity search does not name one
    pub default_search_radius_km: f64,
    /// Upper bound applied to requested search radii
    pub max_search_radius_km: f64,
    /// Maximum number of sites a proximity search returns
    pub max_search_results: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:regain.db?mode=rwc".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl: Duration::from_secs(7 * 24 * 60 * 60),
            port: 5000,
            cors_origins: vec!["http://localhost:5173".to_string()],
            cookie_secure: false,
            bcrypt_cost: 10,
            default_search_radius_km: 15.0,
            max_search_radius_km: 100.0,
            max_search_results: 20,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Unset keys fall back to the defaults. `JWT_SECRET` may only fall back
    /// in debug builds.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(url) = lookup("DATABASE_URL") {
            builder = builder.database_url(url);
        }

        match lookup("JWT_SECRET") {
            Some(secret) => builder = builder.jwt_secret(secret),
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using development secret");
            }
            None => return Err(ConfigError::MissingValue("JWT_SECRET")),
        }

        if let Some(days) = lookup("TOKEN_TTL_DAYS") {
            let days: u64 = parse_value("TOKEN_TTL_DAYS", &days)?;
            builder = builder.token_ttl(Duration::from_secs(days * 24 * 60 * 60));
        }
        if let Some(port) = lookup("SERVER_PORT") {
            builder = builder.port(parse_value("SERVER_PORT", &port)?);
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            builder = builder.cors_origins(
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }
        if let Some(secure) = lookup("COOKIE_SECURE") {
            builder = builder.cookie_secure(parse_value("COOKIE_SECURE", &secure)?);
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_value("BCRYPT_COST", &cost)?);
        }
        if let Some(radius) = lookup("DEFAULT_SEARCH_RADIUS_KM") {
            builder = builder.default_search_radius_km(parse_value("DEFAULT_SEARCH_RADIUS_KM", &radius)?);
        }
        if let Some(radius) = lookup("MAX_SEARCH_RADIUS_KM") {
            builder = builder.max_search_radius_km(parse_value("MAX_SEARCH_RADIUS_KM", &radius)?);
        }
        if let Some(limit) = lookup("MAX_SEARCH_RESULTS") {
            builder = builder.max_search_results(parse_value("MAX_SEARCH_RESULTS", &limit)?);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if !(self.max_search_radius_km > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "MAX_SEARCH_RADIUS_KM",
                value: self.max_search_radius_km.to_string(),
            });
        }
        if !(self.default_search_radius_km > 0.0)
            || self.default_search_radius_km > self.max_search_radius_km
        {
            return Err(ConfigError::InvalidValue {
                key: "DEFAULT_SEARCH_RADIUS_KM",
                value: self.default_search_radius_km.to_string(),
            });
        }
        if self.max_search_results == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MAX_SEARCH_RESULTS",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    /// Set the token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    /// Set the token lifetime
    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.config.token_ttl = ttl;
        self
    }

    /// Set the listening port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the allowed CORS origins
    pub fn cors_origins(mut self, origins: Vec<String>) -> Self {
        self.config.cors_origins = origins;
        self
    }

    /// Mark the session cookie `Secure`
    pub fn cookie_secure(mut self, secure: bool) -> Self {
        self.config.cookie_secure = secure;
        self
    }

    /// Set the bcrypt cost
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    /// Set the default proximity search radius in kilometres
    pub fn default_search_radius_km(mut self, radius: f64) -> Self {
        self.config.default_search_radius_km = radius;
        self
    }

    /// Set the maximum proximity search radius in kilometres
    pub fn max_search_radius_km(mut self, radius: f64) -> Self {
        self.config.max_search_radius_km = radius;
        self
    }

    /// Set the maximum number of proximity search results
    pub fn max_search_results(mut self, limit: usize) -> Self {
        self.config.max_search_results = limit;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
