use log::{debug, info, warn};
use std::sync::Arc;

use crate::error::SearchError;
use crate::mealdb::{non_blank, MealSource, RawMeal};
use crate::model::{MealSummary, Query};

/// Runs free-text searches against the upstream service
#[derive(Clone)]
pub struct SearchController {
    source: Arc<dyn MealSource>,
}

impl SearchController {
    pub fn new(source: Arc<dyn MealSource>) -> Self {
        Self { source }
    }

    /// Search for meals matching `input`.
    ///
    /// Blank input fails with [`SearchError::EmptyInput`] before any request
    /// is made. Results keep the order upstream returned them in.
    pub async fn search(&self, input: &str) -> Result<Vec<MealSummary>, SearchError> {
        let query = Query::parse(input)?;
        self.search_query(&query).await
    }

    pub async fn search_query(&self, query: &Query) -> Result<Vec<MealSummary>, SearchError> {
        debug!("Searching for {:?}", query.as_str());

        let response = self.source.search(query.as_str()).await.map_err(|e| {
            warn!("Search for {:?} failed: {}", query.as_str(), e);
            SearchError::Transient(e)
        })?;

        let meals = match response.meals {
            Some(meals) if !meals.is_empty() => meals,
            _ => return Err(SearchError::NotFound(query.to_string())),
        };

        let summaries: Vec<MealSummary> = meals.iter().map(summarize).collect();
        info!("Found {} meals for {:?}", summaries.len(), query.as_str());
        Ok(summaries)
    }
}

fn summarize(meal: &RawMeal) -> MealSummary {
    MealSummary {
        id: meal.id.clone().unwrap_or_default(),
        name: meal.name.clone().unwrap_or_default(),
        thumbnail_url: meal.thumbnail.clone().unwrap_or_default(),
        category: non_blank(meal.category.as_deref()).map(String::from),
    }
}
