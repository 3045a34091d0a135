use serde::Serialize;
use std::fmt;

use crate::error::SearchError;

pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_INSTRUCTIONS: &str = "No instructions available.";

/// A trimmed, non-empty search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Trim user input, rejecting empty or whitespace-only terms
    pub fn parse(input: &str) -> Result<Self, SearchError> {
        let term = input.trim();
        if term.is_empty() {
            return Err(SearchError::EmptyInput);
        }
        Ok(Query(term.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result card for a single meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealSummary {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientLine {
    /// Empty when upstream gave no measure
    pub measure: String,
    pub ingredient: String,
}

impl fmt::Display for IngredientLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.measure.is_empty() {
            f.write_str(&self.ingredient)
        } else {
            write!(f, "{} {}", self.measure, self.ingredient)
        }
    }
}

/// Full view model for a single meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealDetail {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    pub category: String,
    pub instructions: String,
    pub ingredients: Vec<IngredientLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}
