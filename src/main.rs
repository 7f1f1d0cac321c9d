use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use creatorverse::server::{build_store, config::ServerConfig};
use creatorverse::version::VERSION;
use creatorverse::web::{create_axum_router, AppState};

#[derive(Parser, Debug)]
#[command(author, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Keep creators in process memory instead of Supabase
    #[arg(long)]
    in_memory: bool,
}

fn init_logging(log_dir: &str) {
    // Log to a file: JSON format, daily rotation
    let file_appender = rolling::daily(log_dir, "creatorverse.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .json();

    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal.");
    }
    info!("Shutdown signal received.");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Checked before clap so the output stays a single line.
    if std::env::args().any(|arg| arg == "--version") {
        println!("Creatorverse version: {VERSION}");
        return Ok(());
    }

    let args = Args::parse();

    // Logging needs log_dir, so a config failure is reported on stderr.
    let server_config = match ServerConfig::load(args.config.as_deref(), args.in_memory) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load server configuration: {e}");
            return Err(e.into());
        }
    };

    init_logging(&server_config.log_dir);
    info!("Starting Creatorverse, version: {}", VERSION);

    let store = build_store(&server_config).map_err(|e| {
        error!(error = %e, "Failed to create creator store.");
        e
    })?;
    info!(store = server_config.store_label(), table = %server_config.creators_table, "Creator store ready.");

    let app_state = Arc::new(AppState::new(store)?);
    let app = create_axum_router(app_state);

    let listener = tokio::net::TcpListener::bind(server_config.listen_addr).await?;
    info!(address = %server_config.listen_addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
