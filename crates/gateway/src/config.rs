//! Gateway configuration.

use std::env;

use common::{AppInfo, GrpcClientConfig};

pub const DEFAULT_PORT: u16 = 8081;

/// Gateway configuration. The bind address comes from the CLI.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub app: AppInfo,
    /// User service gRPC endpoint
    pub user_service: GrpcClientConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key: &str| env::var(key).ok().filter(|v| !v.is_empty()))
    }

    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            app: AppInfo::from_vars(&var, env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            user_service: GrpcClientConfig::from_vars(&var),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}
