//! HITL assistant server entry point
//!
//! Loads configuration, initializes tracing, and starts the API server.

use anyhow::Result;
use clap::{Parser, Subcommand};
use hitl_common::SystemConfig;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "hitl-server")]
#[command(version = "0.1.0")]
#[command(about = "Human-in-the-loop AI assistant server")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },
    /// Validate configuration and exit
    ValidateConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = cli.log_level.as_deref().unwrap_or("info");
    hitl_common::init_tracing_with_level(log_level)?;

    info!("HITL assistant server v0.1.0 starting");

    let config = SystemConfig::from_file(&cli.config).map_err(|e| {
        error!("Failed to load configuration from {}: {}", cli.config, e);
        e
    })?;

    info!("Configuration loaded successfully");
    info!(
        "Gate mode: {:?}, model: {}",
        config.gate.mode, config.llm.model
    );

    match cli.command {
        Some(Commands::ValidateConfig) => {
            println!("✓ Configuration is valid");
            println!("  Model: {}", config.llm.model);
            println!("  Gate mode: {:?}", config.gate.mode);
            println!(
                "  Session TTL: {}s (sweep every {}s)",
                config.session.idle_ttl_secs, config.session.sweep_interval_secs
            );
            Ok(())
        }
        Some(Commands::Serve { host, port }) => {
            let mut config = config;
            if let Some(h) = host {
                config.server.host = h;
            }
            if let Some(p) = port {
                config.server.port = p;
            }
            start_server(config).await
        }
        None => start_server(config).await,
    }
}

async fn start_server(config: SystemConfig) -> Result<()> {
    info!(
        "Starting server on {}:{}",
        config.server.host, config.server.port
    );
    let server = hitl_api::ApiServer::new(config)?;
    server.run().await
}
