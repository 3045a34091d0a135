use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

use super::{
    results_heading, searching_heading, Cards, Renderer, LOADING_DETAIL, LOADING_RESULTS,
};
use crate::model::{MealDetail, MealSummary, Query};
use crate::session::Pending;

/// HTML fragments for embedding in a page. Upstream text is always escaped.
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn idle(&self) -> String {
        String::new()
    }

    fn loading(&self, pending: &Pending, cards: Option<Cards<'_>>) -> String {
        let panel = match pending {
            Pending::Search(query) => format!(
                "<h2 class=\"result-heading\">{}</h2>\n<div class=\"loading\">{}</div>",
                encode_text(&searching_heading(query)),
                LOADING_RESULTS
            ),
            Pending::Detail(_) => format!("<div class=\"loading\">{}</div>", LOADING_DETAIL),
        };
        self.with_cards(panel, cards)
    }

    fn results(&self, query: Option<&Query>, meals: &[MealSummary]) -> String {
        let mut out = String::new();
        if let Some(query) = query {
            let _ = writeln!(
                out,
                "<h2 class=\"result-heading\">{}</h2>",
                encode_text(&results_heading(query))
            );
        }
        out.push_str("<div id=\"meals\">");
        for meal in meals {
            let _ = write!(
                out,
                "<div class=\"meal\" data-meal-id=\"{}\"><img src=\"{}\" alt=\"{}\"><div class=\"meal-info\"><h3 class=\"meal-title\">{}</h3>",
                encode_double_quoted_attribute(&meal.id),
                encode_double_quoted_attribute(&meal.thumbnail_url),
                encode_double_quoted_attribute(&meal.name),
                encode_text(&meal.name)
            );
            if let Some(category) = &meal.category {
                let _ = write!(out, "<div class=\"meal-category\">{}</div>", encode_text(category));
            }
            out.push_str("</div></div>");
        }
        out.push_str("</div>");
        out
    }

    fn error(&self, message: &str, cards: Option<Cards<'_>>) -> String {
        let panel = format!("<div id=\"error-container\">{}</div>", encode_text(message));
        self.with_cards(panel, cards)
    }

    fn detail(&self, detail: &MealDetail, cards: Option<Cards<'_>>) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "<img src=\"{}\" alt=\"{}\" class=\"meal-details-img\">\n<h2 class=\"meal-details-title\">{}</h2>\n",
            encode_double_quoted_attribute(&detail.thumbnail_url),
            encode_double_quoted_attribute(&detail.name),
            encode_text(&detail.name)
        );
        let _ = write!(
            out,
            "<div class=\"meal-details-category\"><span>{}</span></div>\n",
            encode_text(&detail.category)
        );
        let _ = write!(
            out,
            "<div class=\"meal-details-instructions\"><h3>Instructions</h3><p>{}</p></div>\n",
            encode_text(&detail.instructions)
        );
        out.push_str("<div class=\"meal-details-ingredients\"><h3>Ingredients</h3><ul class=\"ingredients-list\">");
        for line in &detail.ingredients {
            let _ = write!(out, "<li>{}</li>", encode_text(&line.to_string()));
        }
        out.push_str("</ul></div>");
        if let Some(video) = &detail.video_url {
            let _ = write!(
                out,
                "\n<a href=\"{}\" target=\"_blank\" class=\"youtube-link\">Watch Video</a>",
                encode_double_quoted_attribute(video)
            );
        }
        self.with_cards(out, cards)
    }
}

impl HtmlRenderer {
    fn with_cards(&self, panel: String, cards: Option<Cards<'_>>) -> String {
        match cards {
            Some(cards) => format!("{}\n{}", panel, self.results(cards.query, cards.meals)),
            None => panel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_text_is_escaped() {
        let meals = vec![MealSummary {
            id: "1\"".to_string(),
            name: "<script>alert(1)</script>".to_string(),
            thumbnail_url: "https://example.com/x.jpg".to_string(),
            category: Some("Fish & Chips".to_string()),
        }];

        let frame = HtmlRenderer.results(None, &meals);
        assert!(!frame.contains("<script>"));
        assert!(frame.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(frame.contains("Fish &amp; Chips"));
        assert!(frame.contains("data-meal-id=\"1&quot;\""));
    }

    #[test]
    fn test_detail_video_link_only_when_present() {
        let mut detail = MealDetail {
            id: "52771".to_string(),
            name: "Spicy Arrabiata Penne".to_string(),
            thumbnail_url: "https://example.com/a.jpg".to_string(),
            category: "Vegetarian".to_string(),
            instructions: "Boil & drain.".to_string(),
            ingredients: Vec::new(),
            video_url: None,
        };
        let frame = HtmlRenderer.detail(&detail, None);
        assert!(!frame.contains("youtube-link"));
        assert!(frame.contains("<p>Boil &amp; drain.</p>"));

        detail.video_url = Some("https://www.youtube.com/watch?v=1IszT_guI08".to_string());
        let frame = HtmlRenderer.detail(&detail, None);
        assert!(frame.contains("href=\"https://www.youtube.com/watch?v=1IszT_guI08\""));
    }
}
