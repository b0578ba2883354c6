use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed set of menu categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Main Dish")]
    MainDish,
    Appetizer,
    Side,
    Soup,
    Salad,
    Special,
    Beverage,
    Dessert,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 8] = [
        Category::MainDish,
        Category::Appetizer,
        Category::Side,
        Category::Soup,
        Category::Salad,
        Category::Special,
        Category::Beverage,
        Category::Dessert,
    ];

    /// Label as shown in the form and stored in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::MainDish => "Main Dish",
            Category::Appetizer => "Appetizer",
            Category::Side => "Side",
            Category::Soup => "Soup",
            Category::Salad => "Salad",
            Category::Special => "Special",
            Category::Beverage => "Beverage",
            Category::Dessert => "Dessert",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Exact, case-sensitive match on the label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
