//! API Gateway Library
//!
//! HTTP REST API that validates requests and forwards them to user-service
//! over gRPC.

pub mod clients;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::clients::UserClient;
use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the gateway as an embedded component (for combined binary).
pub async fn run_embedded(
    host: &str,
    port: u16,
    user_port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GatewayConfig::from_env();
    config.user_service.endpoint = format!("http://{}:{}", host, user_port);

    run_server_with_config(host, port, config).await
}

/// Run the gateway on the given address with endpoints from the environment.
pub async fn run(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    run_server_with_config(host, port, GatewayConfig::from_env()).await
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: GatewayConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let users = Arc::new(UserClient::connect_lazy(&config.user_service.endpoint)?);
    let state = AppState::new(users);

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!(
        user_service = %config.user_service.endpoint,
        "Gateway listening on {}", addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
