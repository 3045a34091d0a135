use thiserror::Error;

/// Failures talking to the upstream recipe service
#[derive(Error, Debug)]
pub enum FetchError {
    /// Request could not be sent or the body could not be decoded
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The task running the request stopped before producing a result
    #[error("Request ended without a response")]
    Aborted,
}

/// Errors produced by a recipe search
#[derive(Error, Debug)]
pub enum SearchError {
    /// The query was empty or whitespace only; no request was made
    #[error("Please enter a search term")]
    EmptyInput,

    /// Upstream returned no matches for the query
    #[error("No recipes found for \"{0}\". Try something else!")]
    NotFound(String),

    /// The request or its response failed
    #[error("Something went wrong. Please try again.")]
    Transient(#[source] FetchError),
}

/// Errors produced by a recipe lookup
#[derive(Error, Debug)]
pub enum DetailError {
    /// Upstream has no meal with this id
    #[error("Recipe \"{0}\" could not be found.")]
    NotFound(String),

    /// The request or its response failed
    #[error("Could not load recipe details. Please try again.")]
    Transient(#[source] FetchError),
}

impl From<FetchError> for SearchError {
    fn from(err: FetchError) -> Self {
        SearchError::Transient(err)
    }
}

impl From<FetchError> for DetailError {
    fn from(err: FetchError) -> Self {
        DetailError::Transient(err)
    }
}

/// Top-level errors surfaced by the binary and the one-shot helpers
#[derive(Error, Debug)]
pub enum FinderError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Detail(#[from] DetailError),

    /// HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Writing a frame failed
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering failed
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
