use serde::{Deserialize, Serialize};

/// A persisted menu item, one element of a category document's `menu` array.
///
/// Field names on the wire are the ones existing documents already use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Retrievable URL of the uploaded image.
    #[serde(rename = "Img")]
    pub image: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// Digits only, separators stripped.
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Desc")]
    pub description: String,
}
