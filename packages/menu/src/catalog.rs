//! Read side of the menu documents: category listings and dashboard counts.

use chrono::{DateTime, Utc};
use common::document::{DocumentError, DocumentPath, DocumentStore};
use serde_json::Value;
use tracing::warn;

use crate::category::Category;
use crate::entry::MenuEntry;
use crate::session::OwnerId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSummary {
    pub total_dishes: usize,
    /// Every category, in form order, including empty ones.
    pub per_category: Vec<(Category, usize)>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Entries of one category, in insertion order.
///
/// Array elements that do not decode as entries are skipped with a warning.
pub async fn list_entries(
    documents: &dyn DocumentStore,
    collection: &str,
    owner: &OwnerId,
    category: &str,
) -> Result<Vec<MenuEntry>, DocumentError> {
    let path = DocumentPath::root(collection, owner.as_str())?.child(category, "menus")?;
    let Some(doc) = documents.get(&path).await? else {
        return Ok(Vec::new());
    };

    let items = match doc.get("menu") {
        Some(Value::Array(items)) => items.clone(),
        Some(_) => {
            return Err(DocumentError::NotAnArray {
                field: "menu".into(),
            });
        }
        None => Vec::new(),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<MenuEntry>(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(%path, error = %e, "Skipping malformed menu entry");
                None
            }
        })
        .collect())
}

pub async fn summarize(
    documents: &dyn DocumentStore,
    collection: &str,
    owner: &OwnerId,
) -> Result<MenuSummary, DocumentError> {
    let mut per_category = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let count = list_entries(documents, collection, owner, category.as_str())
            .await?
            .len();
        per_category.push((category, count));
    }

    let root = DocumentPath::root(collection, owner.as_str())?;
    let updated_at = documents
        .get(&root)
        .await?
        .and_then(|doc| doc.get("updatedAt").and_then(Value::as_str).map(str::to_owned))
        .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
        .map(|t| t.with_timezone(&Utc));

    Ok(MenuSummary {
        total_dishes: per_category.iter().map(|(_, n)| n).sum(),
        per_category,
        updated_at,
    })
}
