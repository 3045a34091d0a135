mod html;
mod json;
mod text;

pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use text::TextRenderer;

use serde::Deserialize;
use std::io::{self, Write};

use crate::model::{MealDetail, MealSummary, Query};
use crate::session::{Pending, Session, ViewState};

pub const LOADING_RESULTS: &str = "Loading recipes...";
pub const LOADING_DETAIL: &str = "Loading recipe details...";

pub fn searching_heading(query: &Query) -> String {
    format!("Searching for \"{}\"...", query)
}

pub fn results_heading(query: &Query) -> String {
    format!("Search results for \"{}\":", query)
}

/// Result cards that stay listed under another panel
#[derive(Debug, Clone, Copy)]
pub struct Cards<'a> {
    pub query: Option<&'a Query>,
    pub meals: &'a [MealSummary],
}

/// Draws each panel of the session as a string
pub trait Renderer: Send {
    fn idle(&self) -> String;
    fn loading(&self, pending: &Pending, cards: Option<Cards<'_>>) -> String;
    fn results(&self, query: Option<&Query>, meals: &[MealSummary]) -> String;
    fn error(&self, message: &str, cards: Option<Cards<'_>>) -> String;
    fn detail(&self, detail: &MealDetail, cards: Option<Cards<'_>>) -> String;
}

/// Render whichever panel the session currently shows, followed by the
/// result cards when they are still on screen
pub fn render_frame(renderer: &dyn Renderer, session: &Session) -> String {
    let cards = (!session.results().is_empty()).then(|| Cards {
        query: session.query(),
        meals: session.results(),
    });

    match session.state() {
        ViewState::Idle => renderer.idle(),
        ViewState::Loading(pending) => renderer.loading(pending, cards),
        ViewState::Results => renderer.results(session.query(), session.results()),
        ViewState::Error(message) => renderer.error(message, cards),
        ViewState::DetailView(detail) => renderer.detail(detail, cards),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

impl OutputFormat {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            OutputFormat::Text => Box::new(TextRenderer),
            OutputFormat::Html => Box::new(HtmlRenderer),
            OutputFormat::Json => Box::new(JsonRenderer),
        }
    }
}

/// Render target: writes one frame per state change
pub struct Screen<W: Write> {
    renderer: Box<dyn Renderer>,
    out: W,
}

impl<W: Write> Screen<W> {
    pub fn new(renderer: Box<dyn Renderer>, out: W) -> Self {
        Self { renderer, out }
    }

    pub fn draw(&mut self, session: &Session) -> io::Result<()> {
        let frame = render_frame(self.renderer.as_ref(), session);
        writeln!(self.out, "{}", frame)?;
        self.out.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
