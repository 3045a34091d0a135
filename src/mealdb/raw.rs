use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Number of numbered ingredient/measure slots in a meal record
pub const INGREDIENT_SLOTS: usize = 20;

/// Envelope returned by both the search and lookup endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealsResponse {
    #[serde(default)]
    pub meals: Option<Vec<RawMeal>>,
}

/// A meal record exactly as upstream sends it.
///
/// Every field may be missing or null. The numbered `strIngredientN` and
/// `strMeasureN` fields land in `extra` and are read through [`RawMeal::slot`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMeal {
    #[serde(rename = "idMeal", default)]
    pub id: Option<String>,
    #[serde(rename = "strMeal", default)]
    pub name: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strYoutube", default)]
    pub youtube: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Which half of a numbered slot to read
#[derive(Debug, Clone, Copy)]
pub enum SlotField {
    Ingredient,
    Measure,
}

impl SlotField {
    fn prefix(self) -> &'static str {
        match self {
            SlotField::Ingredient => "strIngredient",
            SlotField::Measure => "strMeasure",
        }
    }
}

impl RawMeal {
    /// Raw value of slot `index` (1-based); non-string values count as absent
    pub fn slot(&self, field: SlotField, index: usize) -> Option<&str> {
        self.extra
            .get(&format!("{}{}", field.prefix(), index))
            .and_then(Value::as_str)
    }
}

/// Trim a field, treating blank strings like missing ones
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
