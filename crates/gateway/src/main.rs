//! API Gateway - HTTP REST API in front of user-service.

use clap::{Parser, Subcommand};

use common::{telemetry, AppInfo};
use gateway_lib::config::DEFAULT_PORT;

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "HTTP gateway for the user service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "GATEWAY_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "GATEWAY_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let app = AppInfo::from_env(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    telemetry::init_tracing(&app);

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            gateway_lib::run(&host, port).await?;
        }
    }

    Ok(())
}
