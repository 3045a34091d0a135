use log::{debug, info, warn};
use std::sync::Arc;

use crate::error::DetailError;
use crate::mealdb::{non_blank, MealSource, RawMeal, SlotField, INGREDIENT_SLOTS};
use crate::model::{IngredientLine, MealDetail, DEFAULT_CATEGORY, DEFAULT_INSTRUCTIONS};

/// Fetches a single meal and normalizes it into a [`MealDetail`]
#[derive(Clone)]
pub struct DetailController {
    source: Arc<dyn MealSource>,
}

impl DetailController {
    pub fn new(source: Arc<dyn MealSource>) -> Self {
        Self { source }
    }

    pub async fn lookup(&self, id: &str) -> Result<MealDetail, DetailError> {
        let requested = id;
        let id = id.trim();
        if id.is_empty() {
            return Err(DetailError::NotFound(requested.to_string()));
        }
        debug!("Looking up meal {}", id);

        let response = self.source.lookup(id).await.map_err(|e| {
            warn!("Lookup of meal {} failed: {}", id, e);
            DetailError::Transient(e)
        })?;

        let meal = response
            .meals
            .and_then(|meals| meals.into_iter().next())
            .ok_or_else(|| DetailError::NotFound(id.to_string()))?;

        let detail = to_detail(meal);
        info!(
            "Loaded {:?} with {} ingredients",
            detail.name,
            detail.ingredients.len()
        );
        Ok(detail)
    }
}

/// Collect ingredient slots 1..=20 in order, skipping slots with a blank name
pub fn extract_ingredients(meal: &RawMeal) -> Vec<IngredientLine> {
    (1..=INGREDIENT_SLOTS)
        .filter_map(|slot| {
            let ingredient = non_blank(meal.slot(SlotField::Ingredient, slot))?;
            let measure = non_blank(meal.slot(SlotField::Measure, slot)).unwrap_or_default();
            Some(IngredientLine {
                measure: measure.to_string(),
                ingredient: ingredient.to_string(),
            })
        })
        .collect()
}

fn to_detail(meal: RawMeal) -> MealDetail {
    let ingredients = extract_ingredients(&meal);

    MealDetail {
        category: non_blank(meal.category.as_deref())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string(),
        instructions: non_blank(meal.instructions.as_deref())
            .unwrap_or(DEFAULT_INSTRUCTIONS)
            .to_string(),
        video_url: non_blank(meal.youtube.as_deref()).map(String::from),
        id: meal.id.unwrap_or_default(),
        name: meal.name.unwrap_or_default(),
        thumbnail_url: meal.thumbnail.unwrap_or_default(),
        ingredients,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawMeal {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_single_filled_slot() {
        let mut record = json!({
            "idMeal": "52771",
            "strIngredient1": "penne rigate",
            "strMeasure1": "1 pound",
        });
        for slot in 2..=20 {
            record[format!("strIngredient{}", slot)] = json!("");
            record[format!("strMeasure{}", slot)] = json!(" ");
        }

        let ingredients = extract_ingredients(&raw(record));
        assert_eq!(
            ingredients,
            vec![IngredientLine {
                measure: "1 pound".to_string(),
                ingredient: "penne rigate".to_string(),
            }]
        );
    }

    #[test]
    fn test_gaps_are_skipped_and_order_kept() {
        let meal = raw(json!({
            "strIngredient1": " olive oil ",
            "strMeasure1": " 1/4 cup ",
            "strIngredient2": "   ",
            "strMeasure2": "2 cloves",
            "strIngredient3": null,
            "strIngredient5": "garlic",
            "strMeasure5": null,
            "strIngredient20": "basil",
            "strMeasure20": "6 leaves",
            "strIngredient21": "ignored",
        }));

        let ingredients = extract_ingredients(&meal);
        let names: Vec<&str> = ingredients.iter().map(|l| l.ingredient.as_str()).collect();
        assert_eq!(names, vec!["olive oil", "garlic", "basil"]);
        assert_eq!(ingredients[0].measure, "1/4 cup");
        assert_eq!(ingredients[1].measure, "");
        assert_eq!(ingredients[2].measure, "6 leaves");
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let detail = to_detail(raw(json!({
            "idMeal": "1",
            "strMeal": "Mystery Stew",
            "strCategory": "",
            "strInstructions": "",
            "strYoutube": "",
        })));

        assert_eq!(detail.category, "Uncategorized");
        assert_eq!(detail.instructions, "No instructions available.");
        assert_eq!(detail.video_url, None);
        assert!(detail.ingredients.is_empty());
    }

    #[test]
    fn test_present_fields_are_kept() {
        let detail = to_detail(raw(json!({
            "idMeal": "52771",
            "strMeal": "Spicy Arrabiata Penne",
            "strMealThumb": "https://example.com/arrabiata.jpg",
            "strCategory": "Vegetarian",
            "strInstructions": "Bring a large pot of water to a boil.",
            "strYoutube": "https://www.youtube.com/watch?v=1IszT_guI08",
        })));

        assert_eq!(detail.id, "52771");
        assert_eq!(detail.category, "Vegetarian");
        assert_eq!(detail.instructions, "Bring a large pot of water to a boil.");
        assert_eq!(
            detail.video_url.as_deref(),
            Some("https://www.youtube.com/watch?v=1IszT_guI08")
        );
    }
}
