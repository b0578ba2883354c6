use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::{Document, DocumentError, DocumentPath, DocumentStore, apply_array_union};

/// Process-local document store, used for development and tests.
#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: DashMap<String, Document>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, DocumentError> {
        Ok(self.docs.get(&path.to_string()).map(|d| d.clone()))
    }

    async fn set(&self, path: &DocumentPath, data: Document) -> Result<(), DocumentError> {
        self.docs.insert(path.to_string(), data);
        Ok(())
    }

    async fn array_union(
        &self,
        path: &DocumentPath,
        field: &str,
        values: Vec<Value>,
    ) -> Result<(), DocumentError> {
        // The entry guard holds the shard lock across create and append.
        let mut entry = self.docs.entry(path.to_string()).or_default();
        apply_array_union(entry.value_mut(), field, values)
    }
}
