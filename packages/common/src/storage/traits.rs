use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;
use super::key::BlobKey;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Metadata recorded alongside every stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub content_type: String,
    pub size: u64,
    /// Hex SHA-256 of the object bytes.
    pub etag: String,
    pub created_at: DateTime<Utc>,
}

/// Key-addressed object storage with retrievable URLs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under `key`, replacing any previous object.
    async fn put(
        &self,
        key: &BlobKey,
        data: &[u8],
        content_type: &str,
    ) -> Result<ObjectMetadata, StorageError>;

    /// Resolve a publicly retrievable URL for an existing object.
    async fn url(&self, key: &BlobKey) -> Result<String, StorageError>;

    /// Retrieve all bytes of an object.
    async fn get(&self, key: &BlobKey) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.get_stream(key).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Retrieve an object as a streaming async reader.
    async fn get_stream(&self, key: &BlobKey) -> Result<BoxReader, StorageError>;

    /// Read the metadata recorded at upload time.
    async fn metadata(&self, key: &BlobKey) -> Result<ObjectMetadata, StorageError>;

    /// Check whether an object exists.
    async fn exists(&self, key: &BlobKey) -> Result<bool, StorageError>;

    /// Delete an object.
    ///
    /// Returns `true` if the object was deleted, `false` if it did not exist.
    async fn delete(&self, key: &BlobKey) -> Result<bool, StorageError>;
}
