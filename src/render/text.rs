use std::fmt::Write;

use super::{
    results_heading, searching_heading, Cards, Renderer, LOADING_DETAIL, LOADING_RESULTS,
};
use crate::model::{MealDetail, MealSummary, Query};
use crate::session::Pending;

/// Plain-text frames for the terminal
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn idle(&self) -> String {
        "Type a meal name to search (\"quit\" to exit).".to_string()
    }

    fn loading(&self, pending: &Pending, cards: Option<Cards<'_>>) -> String {
        let panel = match pending {
            Pending::Search(query) => format!("{}\n{}", searching_heading(query), LOADING_RESULTS),
            Pending::Detail(_) => LOADING_DETAIL.to_string(),
        };
        self.with_cards(panel, cards)
    }

    fn results(&self, query: Option<&Query>, meals: &[MealSummary]) -> String {
        let mut out = String::new();
        if let Some(query) = query {
            out.push_str(&results_heading(query));
            out.push('\n');
        }
        for (i, meal) in meals.iter().enumerate() {
            let _ = write!(out, "{:>3}. {}", i + 1, meal.name);
            if let Some(category) = &meal.category {
                let _ = write!(out, " [{}]", category);
            }
            out.push('\n');
            if !meal.thumbnail_url.is_empty() {
                let _ = writeln!(out, "     {}", meal.thumbnail_url);
            }
        }
        out.push_str("Enter a number to open a recipe.");
        out
    }

    fn error(&self, message: &str, cards: Option<Cards<'_>>) -> String {
        self.with_cards(format!("! {}", message), cards)
    }

    fn detail(&self, detail: &MealDetail, cards: Option<Cards<'_>>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", detail.name);
        let _ = writeln!(out, "Category: {}", detail.category);
        if !detail.thumbnail_url.is_empty() {
            let _ = writeln!(out, "Image: {}", detail.thumbnail_url);
        }
        let _ = writeln!(out, "\nInstructions\n{}", detail.instructions);
        out.push_str("\nIngredients\n");
        for line in &detail.ingredients {
            let _ = writeln!(out, "  - {}", line);
        }
        if let Some(video) = &detail.video_url {
            let _ = writeln!(out, "\nWatch Video: {}", video);
        }
        out.push_str("\nType \"back\" to return to the results.");
        self.with_cards(out, cards)
    }
}

impl TextRenderer {
    fn with_cards(&self, panel: String, cards: Option<Cards<'_>>) -> String {
        match cards {
            Some(cards) => format!("{}\n\n{}", panel, self.results(cards.query, cards.meals)),
            None => panel,
        }
    }
}
