use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::BufReader;

use super::error::StorageError;
use super::key::BlobKey;
use super::traits::{BlobStore, BoxReader, ObjectMetadata};

/// Filesystem-backed object store.
///
/// Objects live at `{base_path}/objects/{key}` with their metadata in
/// `{base_path}/meta/{key}.json`. URLs are `{public_base_url}/{key}`.
pub struct FilesystemBlobStore {
    base_path: PathBuf,
    public_base_url: String,
    max_size: u64,
}

impl FilesystemBlobStore {
    /// Create a new filesystem blob store.
    pub async fn new(
        base_path: PathBuf,
        public_base_url: impl Into<String>,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        fs::create_dir_all(base_path.join("objects")).await?;
        fs::create_dir_all(base_path.join("meta")).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            max_size,
        })
    }

    fn object_path(&self, key: &BlobKey) -> PathBuf {
        key.segments()
            .fold(self.base_path.join("objects"), |p, s| p.join(s))
    }

    fn meta_path(&self, key: &BlobKey) -> PathBuf {
        let mut path = key
            .segments()
            .fold(self.base_path.join("meta"), |p, s| p.join(s));
        path.as_mut_os_string().push(".json");
        path
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }

    /// Write `data` to `dest` through a temp file so readers never see a partial object.
    async fn write_atomic(&self, dest: &Path, data: &[u8]) -> Result<(), StorageError> {
        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await?;
        }

        if let Err(e) = fs::rename(&temp_path, dest).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn put(
        &self,
        key: &BlobKey,
        data: &[u8],
        content_type: &str,
    ) -> Result<ObjectMetadata, StorageError> {
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let metadata = ObjectMetadata {
            content_type: content_type.to_string(),
            size: data.len() as u64,
            etag: hex::encode(Sha256::digest(data)),
            created_at: Utc::now(),
        };

        self.write_atomic(&self.object_path(key), data).await?;
        let meta_json = serde_json::to_vec(&metadata)?;
        self.write_atomic(&self.meta_path(key), &meta_json).await?;

        tracing::debug!(%key, size = metadata.size, content_type, "Stored object");
        Ok(metadata)
    }

    async fn url(&self, key: &BlobKey) -> Result<String, StorageError> {
        if !self.exists(key).await? {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(format!("{}/{}", self.public_base_url, key))
    }

    async fn get_stream(&self, key: &BlobKey) -> Result<BoxReader, StorageError> {
        match fs::File::open(self.object_path(key)).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn metadata(&self, key: &BlobKey) -> Result<ObjectMetadata, StorageError> {
        match fs::read(self.meta_path(key)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, key: &BlobKey) -> Result<bool, StorageError> {
        Ok(fs::try_exists(self.object_path(key)).await?)
    }

    async fn delete(&self, key: &BlobKey) -> Result<bool, StorageError> {
        let removed = match fs::remove_file(self.object_path(key)).await {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => return Err(e.into()),
        };
        match fs::remove_file(self.meta_path(key)).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(removed)
    }
}
