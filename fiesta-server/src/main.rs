//! fiesta-server - party roster service
//!
//! Serves the attendee roster, the admin panel (single add, bulk import,
//! paid/picked-up toggles, announcement) and the mini-game high score.
//! All state lives in Redis, or in process memory for local runs.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fiesta_common::config::{StoreBackend, TomlConfig};
use fiesta_common::highscore::HighScoreStore;
use fiesta_common::store::{Keys, MemoryStore, RedisStore, SharedStore};
use fiesta_common::{EventBus, RosterService};
use fiesta_server::{build_router, seed, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for fiesta-server
#[derive(Parser, Debug)]
#[command(name = "fiesta-server")]
#[command(about = "Party roster service with bulk import and admin panel")]
#[command(version)]
struct Cli {
    /// Config file (defaults to FIESTA_CONFIG, then the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Redis URL (overrides the config file)
    #[arg(long, global = true)]
    redis_url: Option<String>,

    /// Keep all state in process memory instead of Redis
    #[arg(long, global = true)]
    memory_store: bool,

    /// Mark the admin session cookie Secure (serving behind HTTPS)
    #[arg(long, env = "FIESTA_SECURE_COOKIES")]
    secure_cookies: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Replace the roster with sample attendees
    Seed,
    /// Reset the mini-game high score and game counter
    ResetScore,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The log level lives in the config file, so loading happens before
    // tracing init and where the config came from is logged right after it
    let (mut config, config_source) = TomlConfig::resolve_with_source(cli.config.as_deref())
        .context("Failed to load configuration")?;
    config
        .apply_env_overrides()
        .context("Invalid environment override")?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(url) = &cli.redis_url {
        config.store.redis_url = url.clone();
    }
    if cli.memory_store {
        config.store.backend = StoreBackend::Memory;
    }

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "fiesta_server={level},fiesta_common={level},tower_http={level}",
                    level = config.logging.level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting fiesta-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    config_source.log();

    let store = connect_store(&config).await?;
    let keys = Keys::new(config.store.namespace.clone());
    info!("Key namespace: {}", keys.namespace());

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, store, keys, cli.secure_cookies).await,
        Command::Seed => {
            let roster = RosterService::new(store, keys, EventBus::default());
            let count = seed::seed_roster(&roster)
                .await
                .context("Failed to seed roster")?;
            info!("Seeded {} sample attendees", count);
            Ok(())
        }
        Command::ResetScore => {
            HighScoreStore::new(store, keys, EventBus::default())
                .reset()
                .await
                .context("Failed to reset high score")?;
            Ok(())
        }
    }
}

/// Open the configured store backend once; every handler shares the handle
async fn connect_store(config: &TomlConfig) -> Result<SharedStore> {
    match config.store.backend {
        StoreBackend::Memory => {
            warn!("Using in-memory store: all data is lost when the process exits");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Redis => {
            let store = RedisStore::connect(&config.store.redis_url)
                .await
                .context("Failed to connect to Redis")?;
            store.ping().await.context("Redis did not answer PING")?;
            info!("✓ Connected to Redis");
            Ok(Arc::new(store))
        }
    }
}

async fn serve(
    config: TomlConfig,
    store: SharedStore,
    keys: Keys,
    secure_cookies: bool,
) -> Result<()> {
    let admin_password = config.effective_admin_password().map(str::to_string);
    if admin_password.is_none() {
        warn!("No admin password configured: admin routes are open to everyone");
    } else {
        info!("✓ Admin authentication enabled");
    }

    let state = AppState::new(store, keys, admin_password).with_secure_cookies(secure_cookies);
    let app = build_router(state);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("fiesta-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
