mod client;
mod raw;

pub use client::MealDbClient;
pub use raw::{non_blank, MealsResponse, RawMeal, SlotField, INGREDIENT_SLOTS};

use async_trait::async_trait;

use crate::error::FetchError;

/// Base URL of the public TheMealDB API
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Upstream recipe service
#[async_trait]
pub trait MealSource: Send + Sync {
    /// `search.php?s=<term>`
    async fn search(&self, term: &str) -> Result<MealsResponse, FetchError>;

    /// `lookup.php?i=<id>`
    async fn lookup(&self, id: &str) -> Result<MealsResponse, FetchError>;
}
