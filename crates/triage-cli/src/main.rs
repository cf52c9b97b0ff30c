mod config;
mod output;

use clap::{Parser, Subcommand};
use config::TriageConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use triage_gateway::GatewayServer;
use triage_memory::ResponseIndex;

#[derive(Parser)]
#[command(name = "triage", about = "Triage — first-aid instructions by nearest-phrase lookup")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "triage.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Look up the instructions for a single description
    Lookup {
        /// Free-text description of the emergency
        query: String,
        /// Also print the matched trigger and its distance
        #[arg(long)]
        explain: bool,
    },
    /// List the configured trigger → response table
    Responses,
}

/// Build the index from config. Any failure here aborts startup.
async fn build_index(config: &TriageConfig) -> anyhow::Result<ResponseIndex> {
    let provider = config.embedding.provider()?;
    let index = ResponseIndex::build(&config.responses, provider)
        .await?
        .with_fallback(config.bot.fallback_response.clone());
    Ok(index)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let cli = Cli::parse();
    let config = TriageConfig::load(&cli.config).await?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let settings = config.bot.settings()?;
            let index = Arc::new(build_index(&config).await?);
            info!(
                entries = index.len(),
                dimension = index.dimension(),
                provider = ?config.embedding.provider,
                "Index ready"
            );

            let app = GatewayServer::build_with_settings(index, settings);

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("Triage server listening on {}", addr);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        Commands::Lookup { query, explain } => {
            let index = build_index(&config).await?;
            let hit = index.search(&query).await;
            output::write_lookup(
                &mut std::io::stdout().lock(),
                hit.as_ref(),
                index.fallback(),
                explain,
            )?;
        }
        Commands::Responses => {
            output::write_responses(
                &mut std::io::stdout().lock(),
                &config.responses,
                &cli.config,
            )?;
        }
    }

    Ok(())
}
