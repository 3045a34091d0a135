//! Search TheMealDB for recipes and browse their details.
//!
//! The crate is split into the upstream client ([`mealdb`]), the two
//! controllers that turn upstream records into view models
//! ([`SearchController`], [`DetailController`]), the UI state machine
//! ([`Session`]) and renderers that draw it ([`render`]). [`App`] wires all of
//! them into an interactive session.

pub mod app;
pub mod config;
pub mod controllers;
pub mod error;
pub mod mealdb;
pub mod model;
pub mod render;
pub mod session;

pub use app::{Action, App, Flow};
pub use config::FinderConfig;
pub use controllers::{DetailController, SearchController};
pub use error::{DetailError, FetchError, FinderError, SearchError};
pub use mealdb::{MealDbClient, MealSource};
pub use model::{IngredientLine, MealDetail, MealSummary, Query};
pub use render::{OutputFormat, Renderer, Screen};
pub use session::{Session, ViewState};

use std::sync::Arc;

fn default_source() -> Result<Arc<dyn MealSource>, FetchError> {
    let client = MealDbClient::new(&FinderConfig::default()).map_err(FetchError::Transport)?;
    Ok(Arc::new(client))
}

/// Search the public API with default settings
///
/// # Example
/// ```no_run
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let meals = meal_finder::search_meals("Arrabiata").await?;
/// for meal in meals {
///     println!("{} ({})", meal.name, meal.id);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_meals(query: &str) -> Result<Vec<MealSummary>, SearchError> {
    // Blank input must not even build a client
    let query = Query::parse(query)?;
    SearchController::new(default_source()?)
        .search_query(&query)
        .await
}

/// Look up a single meal by id with default settings
pub async fn lookup_meal(id: &str) -> Result<MealDetail, DetailError> {
    DetailController::new(default_source()?).lookup(id).await
}
