use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use common::document::filesystem::FilesystemDocumentStore;
use common::storage::filesystem::FilesystemBlobStore;
use tracing::{Level, info};

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let blob_store = FilesystemBlobStore::new(
        config.storage.blob_dir(),
        config.storage.public_base_url.clone(),
        config.storage.max_blob_size,
    )
    .await
    .context("Failed to open blob store")?;
    let documents = FilesystemDocumentStore::new(config.storage.document_dir())
        .await
        .context("Failed to open document store")?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    let cors = server::cors_layer(&config.server.cors);

    let state = AppState {
        config: Arc::new(config),
        blob_store: Arc::new(blob_store),
        documents: Arc::new(documents),
    };

    let app = server::build_router(state).layer(cors);

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
