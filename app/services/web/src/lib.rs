mod handlers;
mod routings;

pub use crate::routings::router;
use app_chat_logger::ChatLogger;
use app_config::{AppConfig, SeedAdmin};
use app_cryptography::hash::hash;
use app_error::AppError;
use app_log::init_tracing;
use app_state::AppState;
use app_store::{RecordStore, SqliteStore};
use std::sync::Arc;
use tracing::*;

/// Opens the store, seeds the bootstrap admin and starts the chat log writer.
pub async fn build_state(config: AppConfig) -> Result<Arc<AppState>, AppError> {
    let store: Arc<dyn RecordStore> =
        Arc::new(SqliteStore::connect(&config.database_url, config.db_connection).await?);
    if let Some(seed) = &config.seed_admin {
        seed_admin(store.as_ref(), seed, config.bcrypt_cost).await?;
    }
    let (chat_logger, _writer) = ChatLogger::spawn(store.clone());
    Ok(Arc::new(AppState {
        config,
        store,
        chat_logger,
    }))
}

async fn seed_admin(store: &dyn RecordStore, seed: &SeedAdmin, cost: u32) -> Result<(), AppError> {
    if store.find_admin_by_username(&seed.username).await?.is_some() {
        debug!("Admin {} already present", seed.username);
        return Ok(());
    }
    let password_hash = hash(&seed.password, cost)?;
    if store
        .ensure_admin(&seed.username, &seed.email, &password_hash)
        .await?
    {
        info!("Seeded admin user {}", seed.username);
    } else {
        warn!("Admin seed skipped: email {} is taken", seed.email);
    }
    Ok(())
}

pub async fn web_service() -> Result<(), AppError> {
    let config = AppConfig::new()?;
    init_tracing(config.log_level);
    let bind = config.backend_bind.clone();
    let state = build_state(config).await?;
    // Loading Routes
    let routes = router(state.clone());
    // Setup TCP Port
    let tcp_listener = tokio::net::TcpListener::bind(&bind).await?;
    // Running Server ...
    info!("Serving web server on {}", &bind);
    axum::serve(tcp_listener, routes)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    state.chat_logger.flush().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
