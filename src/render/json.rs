use serde_json::{json, Value};

use super::{Cards, Renderer, LOADING_DETAIL, LOADING_RESULTS};
use crate::model::{MealDetail, MealSummary, Query};
use crate::session::Pending;

/// One JSON document per frame, tagged by `state`
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn idle(&self) -> String {
        json!({ "state": "idle" }).to_string()
    }

    fn loading(&self, pending: &Pending, cards: Option<Cards<'_>>) -> String {
        let value = match pending {
            Pending::Search(query) => json!({
                "state": "loading",
                "query": query.as_str(),
                "message": LOADING_RESULTS,
            }),
            Pending::Detail(id) => json!({
                "state": "loading",
                "id": id,
                "message": LOADING_DETAIL,
            }),
        };
        with_cards(value, cards).to_string()
    }

    fn results(&self, query: Option<&Query>, meals: &[MealSummary]) -> String {
        format!(
            "{:#}",
            json!({
                "state": "results",
                "query": query.map(Query::as_str),
                "meals": meals,
            })
        )
    }

    fn error(&self, message: &str, cards: Option<Cards<'_>>) -> String {
        with_cards(json!({ "state": "error", "message": message }), cards).to_string()
    }

    fn detail(&self, detail: &MealDetail, cards: Option<Cards<'_>>) -> String {
        let value = json!({ "state": "detail", "meal": detail });
        format!("{:#}", with_cards(value, cards))
    }
}

fn with_cards(mut value: Value, cards: Option<Cards<'_>>) -> Value {
    if let Some(cards) = cards {
        value["cards"] = json!({
            "query": cards.query.map(Query::as_str),
            "meals": cards.meals,
        });
    }
    value
}
