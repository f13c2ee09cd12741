// Request-scoped error taxonomy
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    /// Backend unreachable, query timed out, or credentials rejected.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Backend reachable but the query produced no top-level results
    /// or reported an error of its own.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// A row had the expected shape but a cell could not be decoded.
    #[error("malformed row: {0}")]
    MalformedRow(String),

    /// Chart rendering itself failed.
    #[error("chart rendering failed: {0}")]
    Render(String),

    /// Caller-supplied width/height out of range. No backend call is made.
    #[error("invalid chart dimensions")]
    InvalidDimensions,
}
