//! Shared configuration structures.
//!
//! Everything is read from the environment (after `.env` is loaded by the
//! binaries). Each `from_env` has a `from_vars` twin taking a lookup function
//! so defaults can be checked without touching the process environment.

use std::env;

use serde::{Deserialize, Serialize};

fn lookup_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// Application identity and log level shared by every binary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppInfo {
    /// Application name, also used as the token issuer
    pub name: String,
    pub version: String,
    /// Log level name (DEBUG, INFO, WARN, ERROR)
    pub log_level: String,
}

impl AppInfo {
    /// Load from `APP_NAME`, `APP_VERSION` and `LOG_LEVEL`.
    pub fn from_env(default_name: &str, default_version: &str) -> Self {
        Self::from_vars(lookup_env, default_name, default_version)
    }

    pub fn from_vars<F>(var: F, default_name: &str, default_version: &str) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            name: var("APP_NAME").unwrap_or_else(|| default_name.to_string()),
            version: var("APP_VERSION").unwrap_or_else(|| default_version.to_string()),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Tracing filter directive for the configured level.
    pub fn log_filter(&self) -> String {
        match self.log_level.to_ascii_lowercase().as_str() {
            "debug" => "debug",
            "warn" | "warning" => "warn",
            "error" => "error",
            "trace" => "trace",
            _ => "info",
        }
        .to_string()
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(skip_serializing)]
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Load from `DATABASE_URL`, or build the URL from `DB_HOST`, `DB_USER`,
    /// `DB_PASS`, `DB_NAME` and `DB_PORT`.
    pub fn from_env() -> Self {
        Self::from_vars(lookup_env)
    }

    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = var("DATABASE_URL").unwrap_or_else(|| {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                var("DB_USER").unwrap_or_else(|| "postgres".to_string()),
                var("DB_PASS").unwrap_or_else(|| "postgres".to_string()),
                var("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                var("DB_PORT").unwrap_or_else(|| "5432".to_string()),
                var("DB_NAME").unwrap_or_else(|| "user_db".to_string()),
            )
        });

        Self {
            url,
            max_connections: var("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

/// JWT configuration for issuing login tokens.
///
/// Both values are optional here; a login attempted without them fails at
/// signing time rather than at start-up.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JwtConfig {
    #[serde(skip_serializing)]
    pub secret: Option<String>,
    pub expiration_hours: Option<i64>,
}

impl JwtConfig {
    /// Load from `JWT_SECRET` and `JWT_EXPIRATION_HOURS`.
    pub fn from_env() -> Self {
        Self::from_vars(lookup_env)
    }

    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            secret: var("JWT_SECRET"),
            expiration_hours: var("JWT_EXPIRATION_HOURS").and_then(|v| v.parse().ok()),
        }
    }
}

/// gRPC client connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GrpcClientConfig {
    /// Service endpoint URL (e.g., "http://localhost:50051")
    pub endpoint: String,
}

impl GrpcClientConfig {
    /// Load from `USER_SERVICE_URL`, or build it from `USER_SERVICE_HOST` and
    /// `USER_SERVICE_PORT`.
    pub fn from_env() -> Self {
        Self::from_vars(lookup_env)
    }

    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = var("USER_SERVICE_URL").unwrap_or_else(|| {
            format!(
                "http://{}:{}",
                var("USER_SERVICE_HOST").unwrap_or_else(|| "localhost".to_string()),
                var("USER_SERVICE_PORT").unwrap_or_else(|| "50051".to_string()),
            )
        });
        Self { endpoint }
    }
}

impl Default for GrpcClientConfig {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}
