use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;

use super::{Document, DocumentError, DocumentPath, DocumentStore, apply_array_union};

/// Filesystem-backed document store, one JSON file per document.
///
/// `menu/owner-1/Main Dish/menus` is stored at
/// `{base_path}/menu/owner-1/Main%20Dish/menus.json`.
pub struct FilesystemDocumentStore {
    base_path: PathBuf,
    // Serializes read-modify-write updates.
    write_lock: Mutex<()>,
}

impl FilesystemDocumentStore {
    pub async fn new(base_path: PathBuf) -> Result<Self, DocumentError> {
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            write_lock: Mutex::new(()),
        })
    }

    fn doc_path(&self, path: &DocumentPath) -> PathBuf {
        // Encoded segments never contain '.', so this only appends.
        let mut file = path
            .segments()
            .iter()
            .fold(self.base_path.clone(), |p, s| p.join(encode_segment(s)));
        file.set_extension("json");
        file
    }

    async fn read(&self, path: &DocumentPath) -> Result<Option<Document>, DocumentError> {
        match fs::read(self.doc_path(path)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, path: &DocumentPath, data: &Document) -> Result<(), DocumentError> {
        let dest = self.doc_path(path);
        let temp_path = self
            .base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string());

        let bytes = serde_json::to_vec_pretty(data)?;
        if let Err(e) = fs::write(&temp_path, bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await?;
        }

        if let Err(e) = fs::rename(&temp_path, &dest).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}

/// Percent-encode everything outside `a-zA-Z0-9-_` so segments are safe file names.
fn encode_segment(segment: &str) -> String {
    segment
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' => String::from(b as char),
            _ => format!("%{b:02X}"),
        })
        .collect()
}

#[async_trait]
impl DocumentStore for FilesystemDocumentStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, DocumentError> {
        self.read(path).await
    }

    async fn set(&self, path: &DocumentPath, data: Document) -> Result<(), DocumentError> {
        let _guard = self.write_lock.lock().await;
        self.write(path, &data).await
    }

    async fn array_union(
        &self,
        path: &DocumentPath,
        field: &str,
        values: Vec<Value>,
    ) -> Result<(), DocumentError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read(path).await?.unwrap_or_default();
        apply_array_union(&mut doc, field, values)?;
        self.write(path, &doc).await
    }
}
