use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use toyshop_core::ratelimit::FixedWindowLimiter;
use toyshop_core::uploads::UploadStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toyshop_api::config::ServerConfig;
use toyshop_api::router::build_app_router;
use toyshop_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toyshop_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = toyshop_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    toyshop_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    toyshop_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Upload store ---
    let uploads = UploadStore::new(&config.upload_dir);
    uploads
        .ensure_dirs()
        .await
        .expect("Failed to create upload directories");
    tracing::info!(root = %uploads.root().display(), "Upload directories ready");

    // --- Rate limiter ---
    let limiter = FixedWindowLimiter::new(
        config.rate_limit_max,
        Duration::from_secs(config.rate_limit_window_secs),
    );

    // --- App state & router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        uploads: Arc::new(uploads),
        limiter: Arc::new(limiter),
        started_at: Instant::now(),
    };
    let app = build_app_router(state);

    let addr = SocketAddr::new(config.host.parse().expect("Invalid HOST"), config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
