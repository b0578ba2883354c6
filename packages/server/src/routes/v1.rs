use axum::{
    Router,
    routing::{get, post},
};

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> Router<AppState> {
    Router::new().nest("/menu", menu_routes(config))
}

fn menu_routes(config: &AppConfig) -> Router<AppState> {
    let read = Router::new()
        .route("/summary", get(handlers::menu::menu_summary))
        .route("/{category}", get(handlers::menu::list_menu_items));

    let upload = Router::new()
        .route("/{category}", post(handlers::menu::create_menu_item))
        .layer(handlers::menu::upload_body_limit(
            config.storage.max_blob_size,
        ));

    read.merge(upload)
}
