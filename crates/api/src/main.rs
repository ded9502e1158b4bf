use std::net::SocketAddr;
use std::sync::Arc;

use medidoc_api::config::ServerConfig;
use medidoc_api::router::build_app_router;
use medidoc_api::sessions::SessionSlots;
use medidoc_api::state::AppState;
use medidoc_db::SeedConfig;
use medidoc_llm::{ProviderRegistry, ProviderSettings};
use medidoc_pipeline::{GenerationConfig, PgGenerationStore, SummaryOrchestrator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "medidoc_api=debug,medidoc_pipeline=debug,medidoc_llm=info,medidoc_db=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let generation_config =
        GenerationConfig::from_env().expect("Invalid generation configuration");

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let seed = SeedConfig {
        directory: generation_config.directory.clone(),
        ..SeedConfig::default()
    };
    let pool = medidoc_db::bootstrap(&database_url, &config.pool, &seed)
        .await
        .expect("Failed to initialize database");
    tracing::info!("Database ready");

    let registry = ProviderRegistry::from_settings(&ProviderSettings::from_env());
    if registry.available().is_empty() {
        tracing::warn!("No AI provider credentials configured, generation is disabled");
    }

    let store = Arc::new(PgGenerationStore::new(pool.clone()));
    let orchestrator = Arc::new(SummaryOrchestrator::new(store, registry, generation_config));

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        orchestrator,
        sessions: Arc::new(SessionSlots::new(config.session_result_ttl)),
    };

    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    // Connection info feeds the IP allow-list.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");

    tracing::info!("Server stopped accepting connections, cleaning up");

    pool.close().await;
    tracing::info!("Database pool closed");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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
