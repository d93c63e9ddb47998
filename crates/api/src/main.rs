use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use eventhub_api::background::status_sweep;
use eventhub_api::bootstrap::promote_admin;
use eventhub_api::config::{ConfigError, ServerConfig};
use eventhub_api::router::build_app_router;
use eventhub_api::state::AppState;

type StartupError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

/// `LOG_FORMAT=json` switches to JSON lines; anything else is human-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "eventhub_api=debug,tower_http=debug".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run() -> Result<(), StartupError> {
    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        tz = %config.event_timezone,
        unmatched_tier_policy = ?config.unmatched_tier_policy,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing {
        name: "DATABASE_URL",
    })?;
    let pool = eventhub_db::create_pool(&database_url).await?;
    eventhub_db::health_check(&pool).await?;
    tracing::info!("Database connection pool created");

    eventhub_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    if let Some(email) = &config.admin_email {
        promote_admin(&pool, email).await?;
    }

    // --- Background tasks ---
    let cancel = CancellationToken::new();
    let sweep_handle = tokio::spawn(status_sweep::run(
        pool.clone(),
        config.event_timezone,
        Duration::from_secs(config.status_sweep_interval_secs),
        cancel.clone(),
    ));

    // --- Router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(config.host.parse()?, config.port);
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");
    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), sweep_handle).await;
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Resolve on SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
