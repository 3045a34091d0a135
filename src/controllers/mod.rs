mod detail;
mod search;

pub use detail::{extract_ingredients, DetailController};
pub use search::SearchController;
