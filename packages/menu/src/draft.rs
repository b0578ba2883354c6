use std::fmt;

use common::document::DocumentPath;

use crate::error::DraftError;
use crate::image::{ImageFile, Preview};
use crate::price::{format_number, is_price_input, remove_commas};

/// Hard ceiling on the dish name, in characters.
pub const DISH_NAME_MAX_CHARS: usize = 100;

/// Required form fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Image,
    DishName,
    Price,
    Category,
    Description,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Image => "Image",
            Field::DishName => "Dish name",
            Field::Price => "Price",
            Field::Category => "Category",
            Field::Description => "Description",
        })
    }
}

/// Result of a price keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceEdit {
    Accepted,
    /// The edit contained something other than digits and separators; the
    /// previous value is kept.
    Rejected,
}

/// Unsaved state of one menu item being composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemDraft {
    image: Option<ImageFile>,
    preview: Preview,
    dish_name: String,
    price: String,
    category: String,
    description: String,
}

impl MenuItemDraft {
    /// Fresh draft with the category seeded from the calling context.
    ///
    /// The category is read-only afterwards and trusted as given.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            image: None,
            preview: Preview::Placeholder,
            dish_name: String::new(),
            price: String::new(),
            category: category.into(),
            description: String::new(),
        }
    }

    /// Set the name, dropping everything past [`DISH_NAME_MAX_CHARS`].
    pub fn set_dish_name(&mut self, value: &str) {
        self.dish_name = value.chars().take(DISH_NAME_MAX_CHARS).collect();
    }

    /// Apply a price edit, re-grouping accepted input.
    pub fn set_price(&mut self, value: &str) -> PriceEdit {
        if !is_price_input(value) {
            return PriceEdit::Rejected;
        }
        self.price = format_number(value);
        PriceEdit::Accepted
    }

    pub fn set_description(&mut self, value: &str) {
        self.description = value.to_string();
    }

    /// Replace the pending image and its preview.
    pub fn select_image(&mut self, image: ImageFile) {
        self.preview = Preview::DataUrl(image.data_url());
        self.image = Some(image);
    }

    pub fn image(&self) -> Option<&ImageFile> {
        self.image.as_ref()
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn dish_name(&self) -> &str {
        &self.dish_name
    }

    /// Live `current/max` counter for the name field.
    pub fn dish_name_counter(&self) -> String {
        format!("{}/{}", self.dish_name.chars().count(), DISH_NAME_MAX_CHARS)
    }

    /// Formatted price as displayed.
    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Back to defaults, keeping the category for the next entry.
    pub fn reset(&mut self) {
        *self = Self::new(std::mem::take(&mut self.category));
    }

    /// Check required fields and produce the submission payload.
    pub fn validate(&self) -> Result<MenuSubmission, DraftError> {
        let image = self.image.clone().ok_or(DraftError::Required(Field::Image))?;
        if self.dish_name.is_empty() {
            return Err(DraftError::Required(Field::DishName));
        }
        let price = remove_commas(&self.price);
        if price.is_empty() {
            return Err(DraftError::Required(Field::Price));
        }
        if !price.chars().all(|c| c.is_ascii_digit()) {
            return Err(DraftError::InvalidPrice);
        }
        if self.category.trim().is_empty() {
            return Err(DraftError::Required(Field::Category));
        }
        DocumentPath::check_segment(&self.category)
            .map_err(|_| DraftError::InvalidCategory(self.category.clone()))?;
        if self.description.is_empty() {
            return Err(DraftError::Required(Field::Description));
        }

        Ok(MenuSubmission {
            image,
            name: self.dish_name.clone(),
            price,
            category: self.category.clone(),
            description: self.description.clone(),
        })
    }
}

/// A draft that passed client-side validation. `price` holds bare digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSubmission {
    pub image: ImageFile,
    pub name: String,
    pub price: String,
    pub category: String,
    pub description: String,
}
