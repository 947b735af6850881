use std::sync::Arc;

use anyhow::{Context, Result};
use rest_api_core::{ConnectConfig, ServerConfig, StorageConfig};
use rest_api_http::{create_router, AppState};
use rest_api_storage::{client, MemoryUserStorage, MongoUserStorage, UserStorage};

use crate::StorageKind;

async fn open_storage(kind: StorageKind) -> Result<Arc<dyn UserStorage>> {
    match kind {
        StorageKind::Memory => {
            tracing::warn!("using in-memory storage, data is lost on exit");
            Ok(Arc::new(MemoryUserStorage::new()))
        },
        StorageKind::Mongodb => {
            let policy = ConnectConfig::from_env();
            let config = StorageConfig::from_env();
            let database = match client::mongo::connect(policy, &config).await {
                Ok(database) => database,
                Err(e) => {
                    tracing::error!(error = %e, "failed to connect to mongodb");
                    return Err(e).context("mongodb is unreachable");
                },
            };
            Ok(Arc::new(MongoUserStorage::new(&database, &config.collection)))
        },
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

pub(crate) async fn run(port: u16, host: String, kind: StorageKind) -> Result<()> {
    let storage = open_storage(kind).await?;
    let state = Arc::new(AppState::new(storage, ServerConfig::from_env()));

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Starting HTTP server on {}", listener.local_addr()?);
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}
