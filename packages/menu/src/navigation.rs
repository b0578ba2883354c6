use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

use crate::category::Category;

/// Listing page of every category. There is no parameterised route.
const LISTING_ROUTES: [(Category, &str); 8] = [
    (Category::MainDish, "/Adminhome/MainDish"),
    (Category::Appetizer, "/Adminhome/Appetizer"),
    (Category::Side, "/Adminhome/Side"),
    (Category::Soup, "/Adminhome/Soup"),
    (Category::Salad, "/Adminhome/Salad"),
    (Category::Special, "/Adminhome/Special"),
    (Category::Beverage, "/Adminhome/Beverage"),
    (Category::Dessert, "/Adminhome/Dessert"),
];

/// Listing route for a raw category value, `None` when it is not one of the known categories.
pub fn listing_route(category: &str) -> Option<&'static str> {
    let category: Category = category.parse().ok()?;
    LISTING_ROUTES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, route)| *route)
}

/// A route change requested after a successful submission.
///
/// `grace` is how long the success notification should stay visible before
/// the page changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub route: &'static str,
    pub grace: Duration,
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, redirect: Redirect);
}

/// Performs the hop on a background task once the grace period has elapsed.
pub struct DeferredNavigator<F> {
    go: Arc<F>,
}

impl<F> DeferredNavigator<F>
where
    F: Fn(&'static str) + Send + Sync + 'static,
{
    pub fn new(go: F) -> Self {
        Self { go: Arc::new(go) }
    }
}

impl<F> Navigator for DeferredNavigator<F>
where
    F: Fn(&'static str) + Send + Sync + 'static,
{
    fn navigate(&self, redirect: Redirect) {
        let go = Arc::clone(&self.go);
        tokio::spawn(async move {
            tokio::time::sleep(redirect.grace).await;
            debug!(route = redirect.route, "Navigating");
            go(redirect.route);
        });
    }
}

/// Keeps requested redirects for the caller to act on.
#[derive(Default)]
pub struct RecordingNavigator {
    seen: Mutex<Vec<Redirect>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Redirect> {
        match self.seen.lock() {
            Ok(mut seen) => std::mem::take(&mut *seen),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, redirect: Redirect) {
        match self.seen.lock() {
            Ok(mut seen) => seen.push(redirect),
            Err(poisoned) => poisoned.into_inner().push(redirect),
        }
    }
}
