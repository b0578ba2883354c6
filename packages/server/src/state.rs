use std::sync::Arc;

use common::document::DocumentStore;
use common::storage::BlobStore;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub blob_store: Arc<dyn BlobStore>,
    pub documents: Arc<dyn DocumentStore>,
}
