//! Event loop tying user actions, network completions and the screen together.

use log::{debug, info, warn};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::controllers::{DetailController, SearchController};
use crate::error::{DetailError, FetchError, FinderError, SearchError};
use crate::mealdb::MealSource;
use crate::model::{MealDetail, MealSummary, Query};
use crate::render::Screen;
use crate::session::{Outcome, Session, Ticket};

/// A single line of user input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Submit the text as a search (blank text included)
    Search(String),
    /// Open the card at this 0-based position
    Select(usize),
    /// Open a meal by id
    Open(String),
    Back,
    Quit,
}

impl Action {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "quit" | "exit" => return Action::Quit,
            "back" | "b" => return Action::Back,
            _ => {}
        }

        const OPEN: &str = "open ";
        let has_open = trimmed
            .get(..OPEN.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(OPEN));
        if has_open {
            return Action::Open(trimmed[OPEN.len()..].trim().to_string());
        }

        match trimmed.parse::<usize>() {
            Ok(n) if n > 0 => Action::Select(n - 1),
            _ => Action::Search(line.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum Completion {
    Search {
        ticket: Ticket,
        query: Query,
        result: Result<Vec<MealSummary>, SearchError>,
    },
    Detail {
        ticket: Ticket,
        result: Result<MealDetail, DetailError>,
    },
}

/// Sends a request's completion back to the app. If the task unwinds before
/// `complete` is called, the fallback is sent on drop instead so the request
/// is still accounted for.
struct CompletionGuard {
    tx: mpsc::UnboundedSender<Completion>,
    fallback: Option<Completion>,
}

impl CompletionGuard {
    fn new(tx: mpsc::UnboundedSender<Completion>, fallback: Completion) -> Self {
        Self {
            tx,
            fallback: Some(fallback),
        }
    }

    fn complete(mut self, completion: Completion) {
        self.fallback = None;
        // The receiver lives as long as the app; a send error means it is gone
        let _ = self.tx.send(completion);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(completion) = self.fallback.take() {
            warn!("Request task stopped before completing");
            let _ = self.tx.send(completion);
        }
    }
}

pub struct App<W: Write> {
    search: SearchController,
    detail: DetailController,
    session: Session,
    screen: Screen<W>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl<W: Write> App<W> {
    pub fn new(source: Arc<dyn MealSource>, screen: Screen<W>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            search: SearchController::new(Arc::clone(&source)),
            detail: DetailController::new(source),
            session: Session::new(),
            screen,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen(&self) -> &Screen<W> {
        &self.screen
    }

    pub fn into_screen(self) -> Screen<W> {
        self.screen
    }

    /// Number of requests whose completion has not been applied yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Apply a user action. Must be called inside a tokio runtime, since
    /// network calls are spawned as tasks.
    pub fn dispatch(&mut self, action: Action) -> Result<Flow, FinderError> {
        debug!("Dispatching {:?}", action);
        match action {
            Action::Quit => return Ok(Flow::Quit),
            Action::Back => {
                if self.session.back() == Outcome::Applied {
                    self.screen.draw(&self.session)?;
                }
            }
            Action::Search(input) => {
                if let Some((ticket, query)) = self.session.begin_search(&input) {
                    self.spawn_search(ticket, query);
                }
                self.screen.draw(&self.session)?;
            }
            Action::Select(index) => {
                if let Some((ticket, id)) = self.session.select(index) {
                    self.spawn_detail(ticket, id);
                    self.screen.draw(&self.session)?;
                }
            }
            Action::Open(id) => {
                if let Some(ticket) = self.session.begin_detail(&id) {
                    self.spawn_detail(ticket, id);
                    self.screen.draw(&self.session)?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn spawn_search(&mut self, ticket: Ticket, query: Query) {
        let controller = self.search.clone();
        let guard = CompletionGuard::new(
            self.tx.clone(),
            Completion::Search {
                ticket,
                query: query.clone(),
                result: Err(SearchError::Transient(FetchError::Aborted)),
            },
        );
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = controller.search_query(&query).await;
            guard.complete(Completion::Search {
                ticket,
                query,
                result,
            });
        });
    }

    fn spawn_detail(&mut self, ticket: Ticket, id: String) {
        let controller = self.detail.clone();
        let guard = CompletionGuard::new(
            self.tx.clone(),
            Completion::Detail {
                ticket,
                result: Err(DetailError::Transient(FetchError::Aborted)),
            },
        );
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = controller.lookup(&id).await;
            guard.complete(Completion::Detail { ticket, result });
        });
    }

    fn apply(&mut self, completion: Completion) -> Result<(), FinderError> {
        self.in_flight = self.in_flight.saturating_sub(1);
        let outcome = match completion {
            Completion::Search {
                ticket,
                query,
                result,
            } => self.session.finish_search(ticket, query, result),
            Completion::Detail { ticket, result } => self.session.finish_detail(ticket, result),
        };

        if outcome == Outcome::Applied {
            self.screen.draw(&self.session)?;
        }
        Ok(())
    }

    /// Wait for the next network call to finish and apply it.
    /// Returns `false` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Result<bool, FinderError> {
        if self.in_flight == 0 {
            return Ok(false);
        }
        match self.rx.recv().await {
            Some(completion) => {
                self.apply(completion)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Apply completions until no request is in flight
    pub async fn settle(&mut self) -> Result<(), FinderError> {
        while self.next_completion().await? {}
        Ok(())
    }

    /// Interactive session: one action per input line until quit or EOF.
    /// Input keeps being read while requests are in flight.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<(), FinderError> {
        let mut lines = input.lines();
        self.screen.draw(&self.session)?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line? {
                        Some(line) => {
                            if self.dispatch(Action::parse(&line))? == Flow::Quit {
                                break;
                            }
                        }
                        None => {
                            self.settle().await?;
                            break;
                        }
                    }
                }
                Some(completion) = self.rx.recv() => self.apply(completion)?,
            }
        }

        info!("Session ended");
        Ok(())
    }
}
