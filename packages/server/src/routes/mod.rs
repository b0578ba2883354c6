mod v1;

use axum::Router;
use axum::routing::get;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> Router<AppState> {
    Router::new().nest("/v1", v1::routes(config))
}

/// Public object URLs handed out by the blob store.
pub fn file_routes() -> Router<AppState> {
    Router::new().route("/{*key}", get(handlers::files::download_file))
}
