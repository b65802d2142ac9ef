//! User service configuration.

use common::{AppInfo, DatabaseConfig, JwtConfig};

/// Default gRPC port of the user service.
pub const DEFAULT_PORT: u16 = 50051;

/// User service configuration. The bind address comes from the CLI.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    pub app: AppInfo,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            app: AppInfo::from_env(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
        }
    }
}
