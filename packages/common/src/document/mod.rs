//! Hierarchical JSON document storage.
//!
//! Documents are JSON objects addressed by [`DocumentPath`]. Besides plain
//! reads and overwrites, stores support an array-union update: values are
//! appended to an array field unless an equal value is already present.

mod error;
mod path;

pub mod filesystem;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

pub use error::DocumentError;
pub use path::DocumentPath;

/// A stored document body.
pub type Document = serde_json::Map<String, Value>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a document, `None` if it does not exist.
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, DocumentError>;

    /// Create or overwrite a document.
    async fn set(&self, path: &DocumentPath, data: Document) -> Result<(), DocumentError>;

    /// Append `values` to the array `field` as one atomic update.
    ///
    /// A missing document or field is created. Values equal to an existing
    /// element are skipped. Concurrent unions on the same document never lose
    /// each other's values.
    async fn array_union(
        &self,
        path: &DocumentPath,
        field: &str,
        values: Vec<Value>,
    ) -> Result<(), DocumentError>;

    async fn exists(&self, path: &DocumentPath) -> Result<bool, DocumentError> {
        Ok(self.get(path).await?.is_some())
    }
}

/// Apply array-union semantics to an in-memory document.
pub fn apply_array_union(
    doc: &mut Document,
    field: &str,
    values: Vec<Value>,
) -> Result<(), DocumentError> {
    let slot = doc
        .entry(field.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));

    let Value::Array(items) = slot else {
        return Err(DocumentError::NotAnArray {
            field: field.to_string(),
        });
    };

    for value in values {
        if !items.contains(&value) {
            items.push(value);
        }
    }
    Ok(())
}
