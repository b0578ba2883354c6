use std::path::PathBuf;

use serde::Deserialize;

/// Storage configuration shared by everything that opens the stores.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageAppConfig {
    /// Root directory for blobs and documents. Default: "./data".
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Base URL under which stored objects are served. Default: "http://127.0.0.1:3000/files".
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Largest accepted object in bytes. Default: 10 MiB.
    #[serde(default = "default_max_blob_size")]
    pub max_blob_size: u64,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_public_base_url() -> String {
    "http://127.0.0.1:3000/files".into()
}
fn default_max_blob_size() -> u64 {
    10 * 1024 * 1024
}

impl StorageAppConfig {
    pub fn blob_dir(&self) -> PathBuf {
        self.data_dir.join("blobs")
    }

    pub fn document_dir(&self) -> PathBuf {
        self.data_dir.join("documents")
    }
}

impl Default for StorageAppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            public_base_url: default_public_base_url(),
            max_blob_size: default_max_blob_size(),
        }
    }
}
