use chrono::{DateTime, Utc};
use menu::price::format_number;
use menu::{MenuEntry, MenuSummary, Notification, NotificationLevel, Redirect, SubmitOutcome};
use serde::Serialize;

/// A stored dish as returned by the API.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MenuItemResponse {
    /// Retrievable URL of the dish image.
    #[schema(example = "http://127.0.0.1:3000/files/menu/0b0a6f0e-9d5c-4a3f-8c55-1f6b1bfb2a10")]
    pub image: String,
    #[schema(example = "Jollof Rice")]
    pub name: String,
    /// Bare digits, as stored.
    #[schema(example = "2500")]
    pub price: String,
    /// Price with thousands separators.
    #[schema(example = "2,500")]
    pub price_display: String,
    #[schema(example = "Main Dish")]
    pub category: String,
    pub description: String,
}

impl From<MenuEntry> for MenuItemResponse {
    fn from(entry: MenuEntry) -> Self {
        Self {
            price_display: format_number(&entry.price),
            image: entry.image,
            name: entry.name,
            price: entry.price,
            category: entry.category,
            description: entry.description,
        }
    }
}

/// Where the client should go once the success notification has been shown.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RedirectResponse {
    #[schema(example = "/Adminhome/MainDish")]
    pub route: String,
    /// Delay before navigating, in milliseconds.
    #[schema(example = 3000)]
    pub after_ms: u64,
}

impl From<Redirect> for RedirectResponse {
    fn from(redirect: Redirect) -> Self {
        Self {
            route: redirect.route.to_string(),
            after_ms: redirect.grace.as_millis() as u64,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct NotificationResponse {
    /// `success` or `error`.
    #[schema(example = "success")]
    pub level: &'static str,
    #[schema(example = "Menu uploaded!")]
    pub message: String,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            level: match n.level {
                NotificationLevel::Success => "success",
                NotificationLevel::Error => "error",
            },
            message: n.message,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmitResponse {
    pub item: MenuItemResponse,
    /// Storage key of the uploaded image.
    #[schema(example = "menu/0b0a6f0e-9d5c-4a3f-8c55-1f6b1bfb2a10")]
    pub image_key: String,
    /// Absent when the category has no listing page.
    pub redirect: Option<RedirectResponse>,
    pub notifications: Vec<NotificationResponse>,
}

impl SubmitResponse {
    pub fn new(outcome: SubmitOutcome, notifications: Vec<Notification>) -> Self {
        Self {
            item: outcome.entry.into(),
            image_key: outcome.image_key.to_string(),
            redirect: outcome.redirect.map(Into::into),
            notifications: notifications.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MenuListResponse {
    #[schema(example = "Soup")]
    pub category: String,
    pub items: Vec<MenuItemResponse>,
    pub total: usize,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CategoryCount {
    #[schema(example = "Dessert")]
    pub category: String,
    pub count: usize,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MenuSummaryResponse {
    pub total_dishes: usize,
    /// Every category, including empty ones.
    pub categories: Vec<CategoryCount>,
    /// Time of the most recent submission, if any.
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<MenuSummary> for MenuSummaryResponse {
    fn from(summary: MenuSummary) -> Self {
        Self {
            total_dishes: summary.total_dishes,
            categories: summary
                .per_category
                .into_iter()
                .map(|(category, count)| CategoryCount {
                    category: category.to_string(),
                    count,
                })
                .collect(),
            updated_at: summary.updated_at,
        }
    }
}
