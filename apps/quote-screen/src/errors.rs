use thiserror::Error;

/// A single fetch from the quote service failed.
/// Every variant is recoverable: the acquirer counts it as a rejected attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Quote service returned status {status}")]
    Status { status: u16 },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Quote service returned no text")]
    MissingText,
}

/// Why an acquisition attempt did not produce displayable content.
///
/// Fetch failures and shape rejections share one attempt budget, so they are
/// modelled as a single error type.
#[derive(Debug, Error)]
pub enum Rejection {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("quote too long: {lines} lines (max {max_lines})")]
    TooLong { lines: usize, max_lines: usize },

    #[error("quote produced no lines")]
    Empty,
}

/// Failure to persist the cache record. Loading never surfaces an error.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Cache persist error: {0}")]
    Persist(#[from] tempfile::PersistError),
}
