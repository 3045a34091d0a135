//! UI-level state shared by the search and detail flows.
//!
//! Every user action that starts a request takes a [`Ticket`]. Completions
//! carry their ticket back and are applied only while it is still the newest
//! one, so a slow response can never overwrite what a later action displayed.

use log::debug;

use crate::error::{DetailError, SearchError};
use crate::model::{MealDetail, MealSummary, Query};

/// Sequence number of an in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Hands out increasing tickets and remembers the newest
#[derive(Debug, Default)]
pub struct RequestGuard {
    latest: u64,
}

impl RequestGuard {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

/// What a `Loading` panel is waiting for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    Search(Query),
    Detail(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading(Pending),
    Results,
    /// Human-readable message shown in place of results
    Error(String),
    DetailView(MealDetail),
}

/// Whether an action or completion changed what is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored,
}

#[derive(Debug)]
pub struct Session {
    state: ViewState,
    guard: RequestGuard,
    query: Option<Query>,
    results: Vec<MealSummary>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: ViewState::Idle,
            guard: RequestGuard::default(),
            query: None,
            results: Vec::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Result cards currently on screen (kept while a detail is open)
    pub fn results(&self) -> &[MealSummary] {
        &self.results
    }

    /// Query behind the displayed result cards
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Whether result cards are visible and can be selected
    pub fn can_select(&self) -> bool {
        !self.results.is_empty()
            && matches!(
                self.state,
                ViewState::Results
                    | ViewState::Loading(Pending::Detail(_))
                    | ViewState::Error(_)
                    | ViewState::DetailView(_)
            )
    }

    /// Start a search. Returns the query and its ticket when a request
    /// should be made; blank input moves straight to the error panel.
    pub fn begin_search(&mut self, input: &str) -> Option<(Ticket, Query)> {
        let ticket = self.guard.issue();
        match Query::parse(input) {
            Ok(query) => {
                debug!("Search {:?} issued {:?}", query.as_str(), ticket);
                self.results.clear();
                self.query = None;
                self.state = ViewState::Loading(Pending::Search(query.clone()));
                Some((ticket, query))
            }
            Err(err) => {
                self.results.clear();
                self.query = None;
                self.state = ViewState::Error(err.to_string());
                None
            }
        }
    }

    pub fn finish_search(
        &mut self,
        ticket: Ticket,
        query: Query,
        result: Result<Vec<MealSummary>, SearchError>,
    ) -> Outcome {
        if !self.guard.is_current(ticket) {
            debug!("Dropping stale search result for {:?} ({:?})", query.as_str(), ticket);
            return Outcome::Ignored;
        }

        match result {
            Ok(summaries) => {
                self.results = summaries;
                self.query = Some(query);
                self.state = ViewState::Results;
            }
            Err(err) => {
                self.results.clear();
                self.query = None;
                self.state = ViewState::Error(err.to_string());
            }
        }
        Outcome::Applied
    }

    /// Start loading the meal behind a displayed card
    pub fn begin_detail(&mut self, id: &str) -> Option<Ticket> {
        if !self.can_select() {
            debug!("Ignoring selection of {} in state {:?}", id, self.state);
            return None;
        }

        let ticket = self.guard.issue();
        debug!("Lookup {} issued {:?}", id, ticket);
        self.state = ViewState::Loading(Pending::Detail(id.to_string()));
        Some(ticket)
    }

    /// Select the `index`-th card (0-based); returns its id and ticket
    pub fn select(&mut self, index: usize) -> Option<(Ticket, String)> {
        let id = self.results.get(index)?.id.clone();
        let ticket = self.begin_detail(&id)?;
        Some((ticket, id))
    }

    pub fn finish_detail(
        &mut self,
        ticket: Ticket,
        result: Result<MealDetail, DetailError>,
    ) -> Outcome {
        if !self.guard.is_current(ticket) {
            debug!("Dropping stale detail result ({:?})", ticket);
            return Outcome::Ignored;
        }

        self.state = match result {
            Ok(detail) => ViewState::DetailView(detail),
            Err(err) => ViewState::Error(err.to_string()),
        };
        Outcome::Applied
    }

    /// Leave the detail panel (or a detail error) and show the cards again
    pub fn back(&mut self) -> Outcome {
        let leaving_detail = match &self.state {
            ViewState::DetailView(_) => true,
            ViewState::Error(_) => !self.results.is_empty(),
            _ => false,
        };
        if !leaving_detail {
            debug!("Back ignored in state {:?}", self.state);
            return Outcome::Ignored;
        }

        self.state = if self.results.is_empty() {
            ViewState::Idle
        } else {
            ViewState::Results
        };
        Outcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    fn summary(id: &str, name: &str) -> MealSummary {
        MealSummary {
            id: id.to_string(),
            name: name.to_string(),
            thumbnail_url: String::new(),
            category: None,
        }
    }

    fn detail(id: &str) -> MealDetail {
        MealDetail {
            id: id.to_string(),
            name: "Spicy Arrabiata Penne".to_string(),
            thumbnail_url: String::new(),
            category: "Vegetarian".to_string(),
            instructions: "Boil.".to_string(),
            ingredients: Vec::new(),
            video_url: None,
        }
    }

    fn with_results(names: &[(&str, &str)]) -> Session {
        let mut session = Session::new();
        let (ticket, query) = session.begin_search("pasta").unwrap();
        let summaries = names.iter().map(|(id, name)| summary(id, name)).collect();
        session.finish_search(ticket, query, Ok(summaries));
        session
    }

    #[test]
    fn test_starts_idle() {
        let session = Session::new();
        assert_eq!(session.state(), &ViewState::Idle);
        assert!(!session.can_select());
    }

    #[test]
    fn test_guard_tickets_increase() {
        let mut guard = RequestGuard::default();
        let first = guard.issue();
        let second = guard.issue();
        assert!(second > first);
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn test_blank_search_errors_without_request() {
        let mut session = Session::new();
        assert!(session.begin_search("   ").is_none());
        assert_eq!(
            session.state(),
            &ViewState::Error("Please enter a search term".to_string())
        );
    }

    #[test]
    fn test_search_flow() {
        let mut session = Session::new();
        let (ticket, query) = session.begin_search(" Arrabiata ").unwrap();
        assert_eq!(
            session.state(),
            &ViewState::Loading(Pending::Search(Query::parse("Arrabiata").unwrap()))
        );

        let outcome = session.finish_search(
            ticket,
            query,
            Ok(vec![summary("52771", "Spicy Arrabiata Penne")]),
        );
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(session.state(), &ViewState::Results);
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.query().map(Query::as_str), Some("Arrabiata"));
    }

    #[test]
    fn test_failed_search_clears_results() {
        let mut session = with_results(&[("1", "Carbonara")]);
        let (ticket, query) = session.begin_search("zzzznoexist").unwrap();
        session.finish_search(
            ticket,
            query,
            Err(SearchError::NotFound("zzzznoexist".to_string())),
        );

        assert!(session.results().is_empty());
        assert_eq!(
            session.state(),
            &ViewState::Error("No recipes found for \"zzzznoexist\". Try something else!".to_string())
        );
    }

    #[test]
    fn test_stale_search_is_dropped() {
        let mut session = Session::new();
        let (slow, slow_query) = session.begin_search("slow").unwrap();
        let (fast, fast_query) = session.begin_search("fast").unwrap();

        session.finish_search(fast, fast_query, Ok(vec![summary("2", "Fast Food")]));
        let outcome = session.finish_search(slow, slow_query, Ok(vec![summary("1", "Slow Roast")]));

        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(session.results()[0].name, "Fast Food");
        assert_eq!(session.query().map(Query::as_str), Some("fast"));
    }

    #[test]
    fn test_blank_search_supersedes_in_flight_request() {
        let mut session = Session::new();
        let (ticket, query) = session.begin_search("soup").unwrap();
        session.begin_search("");

        let outcome = session.finish_search(ticket, query, Ok(vec![summary("1", "Soup")]));
        assert_eq!(outcome, Outcome::Ignored);
        assert!(matches!(session.state(), ViewState::Error(_)));
    }

    #[test]
    fn test_detail_and_back() {
        let mut session = with_results(&[("52771", "Spicy Arrabiata Penne")]);
        let (ticket, id) = session.select(0).unwrap();
        assert_eq!(id, "52771");
        assert_eq!(
            session.state(),
            &ViewState::Loading(Pending::Detail("52771".to_string()))
        );

        session.finish_detail(ticket, Ok(detail("52771")));
        assert!(matches!(session.state(), ViewState::DetailView(d) if d.id == "52771"));

        assert_eq!(session.back(), Outcome::Applied);
        assert_eq!(session.state(), &ViewState::Results);
        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn test_detail_error_keeps_cards_selectable() {
        let mut session = with_results(&[("1", "Carbonara"), ("2", "Lasagne")]);
        let (ticket, _) = session.select(1).unwrap();
        session.finish_detail(
            ticket,
            Err(DetailError::Transient(FetchError::Status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            ))),
        );

        assert_eq!(
            session.state(),
            &ViewState::Error("Could not load recipe details. Please try again.".to_string())
        );
        assert!(session.can_select());
        assert_eq!(session.back(), Outcome::Applied);
        assert_eq!(session.state(), &ViewState::Results);
    }

    #[test]
    fn test_new_search_supersedes_detail() {
        let mut session = with_results(&[("1", "Carbonara")]);
        let (detail_ticket, _) = session.select(0).unwrap();
        let (search_ticket, query) = session.begin_search("curry").unwrap();

        assert_eq!(session.finish_detail(detail_ticket, Ok(detail("1"))), Outcome::Ignored);
        session.finish_search(search_ticket, query, Ok(vec![summary("9", "Katsu Curry")]));
        assert_eq!(session.state(), &ViewState::Results);
        assert_eq!(session.results()[0].id, "9");
    }

    #[test]
    fn test_reselect_while_detail_loads() {
        let mut session = with_results(&[("1", "Carbonara"), ("2", "Lasagne")]);
        let (first, _) = session.select(0).unwrap();
        let (second, id) = session.select(1).unwrap();
        assert_eq!(id, "2");
        assert_eq!(
            session.state(),
            &ViewState::Loading(Pending::Detail("2".to_string()))
        );

        assert_eq!(session.finish_detail(second, Ok(detail("2"))), Outcome::Applied);
        assert_eq!(session.finish_detail(first, Ok(detail("1"))), Outcome::Ignored);
        assert!(matches!(session.state(), ViewState::DetailView(d) if d.id == "2"));
    }

    #[test]
    fn test_select_and_back_are_ignored_when_invalid() {
        let mut session = Session::new();
        assert!(session.select(0).is_none());
        assert!(session.begin_detail("52771").is_none());
        assert_eq!(session.back(), Outcome::Ignored);

        let mut session = with_results(&[("1", "Carbonara")]);
        assert!(session.select(5).is_none());
        assert_eq!(session.back(), Outcome::Ignored);
        assert_eq!(session.state(), &ViewState::Results);
    }
}
