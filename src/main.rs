//! Mock loan API entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use loan_api::api::{create_router, AppState};
use loan_api::config::Config;
use loan_api::db::{verify_connection, DatabaseProbe, PgProbe};
use loan_api::metrics;
use loan_api::utils::shutdown_signal;

/// Mock loan-management HTTP API.
#[derive(Parser, Debug)]
#[command(name = "loan-api")]
#[command(about = "Mock loan-management API with a database health check")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Probe the configured database once.
    CheckDb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("loan_api=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Initialize metrics
    metrics::init_metrics();

    // Handle subcommands
    match args.command {
        Some(Command::Serve { port }) => cmd_serve(port.or(args.port)).await,
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::CheckDb) => cmd_check_db().await,
        None => cmd_serve(args.port).await,
    }
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("LOAN API - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate configuration
    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Database: {}", config.database_target());
    println!(
        "  User: {}",
        config.postgres_user.as_deref().unwrap_or("(driver default)")
    );
    println!(
        "  Password: {}",
        if config.postgres_password.is_some() { "present" } else { "not set" }
    );
    println!(
        "  Pool: {}..{} connections",
        config.db_min_connections, config.db_max_connections
    );
    println!("  Probe Timeout: {}ms", config.db_probe_timeout_ms);
    println!("  HTTP Port: {}", config.port);
    match config.metrics_port {
        Some(port) => println!("  Metrics Port: {}", port),
        None => println!("  Metrics: Disabled"),
    }
    println!("  Log Level: {}", config.log_level);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Probe the configured database once.
async fn cmd_check_db() -> anyhow::Result<()> {
    let config = Config::load_validated()?;

    println!("======================================================================");
    println!("LOAN API - DATABASE CHECK");
    println!("======================================================================");
    println!("Target: {}", config.database_target());
    println!("Timeout: {}ms", config.db_probe_timeout_ms);

    print!("\nRunning probe... ");
    let probe = PgProbe::from_config(&config);
    match probe.ping().await {
        Ok(()) => {
            println!("OK");
            println!("======================================================================");
            Ok(())
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            println!("======================================================================");
            Err(anyhow::anyhow!("Database probe failed"))
        }
    }
}

/// Run the HTTP server.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    // Metrics exporter
    if let Some(metrics_port) = config.metrics_port {
        match metrics::install_exporter(metrics_port) {
            Ok(()) => info!("Metrics exporter listening on port {}", metrics_port),
            Err(e) => warn!("Metrics exporter disabled: {}", e),
        }
    }

    // Database probe
    info!("Database target: {}", config.database_target());
    let probe = Arc::new(PgProbe::from_config(&config));
    verify_connection(probe.as_ref()).await;

    let app_state = AppState::new(probe);
    let router = create_router(app_state);

    // Start HTTP server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Loan API listening on port {}", config.port);
    info!("Log Level: {}", config.log_level);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
