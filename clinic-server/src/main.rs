use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use config_engine::{ConfigLoader, ConfigValidator};
use tracing::{info, warn};

use clinic_server::{create_app, ClinicServer};

/// BiteCare clinic engine HTTP server
#[derive(Parser, Debug)]
#[command(name = "clinic-server")]
#[command(about = "Appointment settlement, billing and vaccine inventory API")]
struct Args {
    /// Server bind address, overrides `server.host`
    #[arg(long, env = "CLINIC_HOST")]
    host: Option<String>,

    /// Server port, overrides `server.port`
    #[arg(short, long, env = "CLINIC_PORT")]
    port: Option<u16>,

    /// Configuration file path (defaults to ./clinic.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_file(path);
    }
    let mut config = loader.load().context("Failed to load configuration")?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.verbose {
        config.logging.log_level = "debug".to_string();
    }
    ConfigValidator::validate(&config)?;

    logger_redacted::init_tracing(&config.logging)?;

    info!("Starting BiteCare clinic server v{}", env!("CARGO_PKG_VERSION"));

    let server = ClinicServer::from_config(&config).await?;
    let app = create_app(server);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("Clinic server running on http://{addr}");
    info!("API v1 available at: http://{addr}/api/v1");
    info!("OpenAPI document at: http://{addr}/api-docs/openapi.json");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_grace_secs))
        .await
        .context("HTTP server error")?;

    info!("Clinic server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM, then arms a hard deadline for in-flight
/// requests
async fn shutdown_signal(grace_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown requested, draining connections for up to {grace_secs}s");
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(grace_secs)).await;
        warn!("Grace period elapsed, exiting");
        std::process::exit(0);
    });
}
