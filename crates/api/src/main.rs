use std::net::SocketAddr;
use std::sync::Arc;

use beacon_core::memory::MemoryProfileStore;
use beacon_core::ports::ProfileStore;
use beacon_google::credentials::{SCOPE_DATASTORE, SCOPE_FIREBASE_MESSAGING};
use beacon_google::{
    AccessTokenSource, FcmConfig, FcmMessenger, FirestoreConfig, FirestoreProfileStore,
    ServiceAccountKey, ServiceAccountTokenSource, StaticTokenSource,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use beacon_api::config::{ServerConfig, StoreBackend};
use beacon_api::router::build_app_router;
use beacon_api::state::AppState;

/// Token the Firestore emulator accepts as an admin credential.
const EMULATOR_TOKEN: &str = "owner";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "beacon_api=debug,beacon_core=info,beacon_google=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        store = config.store.name(),
        "Loaded server configuration"
    );

    // --- Google credentials ---
    let http = beacon_google::http_client().expect("Failed to build HTTP client");

    let credentials_path = config
        .google
        .credentials_path
        .clone()
        .expect("GOOGLE_APPLICATION_CREDENTIALS must point at a service account key");
    let key = ServiceAccountKey::from_file(&credentials_path)
        .expect("Failed to load service account key");

    let project_id = config
        .google
        .project_id
        .clone()
        .or_else(|| key.project_id.clone())
        .expect("FIREBASE_PROJECT_ID must be set when the key has no project_id");
    tracing::info!(%project_id, client_email = %key.client_email, "Loaded Google credentials");

    let tokens: Arc<dyn AccessTokenSource> = Arc::new(
        ServiceAccountTokenSource::new(
            key,
            &[SCOPE_FIREBASE_MESSAGING, SCOPE_DATASTORE],
            http.clone(),
        )
        .expect("Service account private key is not a valid RSA PEM"),
    );

    // --- Messaging provider ---
    let mut fcm_config = FcmConfig::new(project_id.clone());
    fcm_config.validate_only = config.google.fcm_validate_only;
    if fcm_config.validate_only {
        tracing::warn!("FCM_VALIDATE_ONLY is set; messages will be validated but not delivered");
    }
    let messenger = Arc::new(FcmMessenger::new(http.clone(), fcm_config, Arc::clone(&tokens)));

    // --- Profile store ---
    let store: Arc<dyn ProfileStore> = match &config.store {
        StoreBackend::Firestore => {
            let mut firestore_config = FirestoreConfig::new(project_id);
            firestore_config.database = config.google.firestore_database.clone();

            let store_tokens = match &config.google.firestore_emulator_host {
                Some(host) => {
                    firestore_config.base_url = format!("http://{host}");
                    tracing::info!(%host, "Using Firestore emulator");
                    Arc::new(StaticTokenSource(EMULATOR_TOKEN.into())) as Arc<dyn AccessTokenSource>
                }
                None => Arc::clone(&tokens),
            };

            Arc::new(FirestoreProfileStore::new(http, firestore_config, store_tokens))
        }
        StoreBackend::Postgres { database_url } => {
            let pool = beacon_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            beacon_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            beacon_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(beacon_db::PgProfileStore::new(pool))
        }
        StoreBackend::Memory { seed_path } => {
            tracing::warn!("Using in-memory profile store");
            let store = match seed_path {
                Some(path) => {
                    let json = std::fs::read_to_string(path)
                        .unwrap_or_else(|e| panic!("Failed to read PROFILE_SEED_FILE '{path}': {e}"));
                    MemoryProfileStore::from_json(&json)
                        .unwrap_or_else(|e| panic!("Invalid PROFILE_SEED_FILE '{path}': {e}"))
                }
                None => MemoryProfileStore::new(),
            };
            tracing::info!(profiles = store.len().await, "In-memory profiles loaded");
            Arc::new(store)
        }
    };

    // --- App state ---
    let state = AppState::new(config.clone(), store, messenger);

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
