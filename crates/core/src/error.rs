//! Unified error types for digiglass.
//!
//! Every message is prefixed with a stable code so the CLI can surface it
//! as-is and log filters can match on it.

use tokio_rusqlite::rusqlite;

/// Unified error type shared by the cache, fetcher, extractor and catalog.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid caller input.
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Base URL or search URL could not be built.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Fetch failed: connection, timeout, non-success status, oversize body.
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// The category index markup is missing from the page.
    ///
    /// Usually means the page layout changed or an error page came back.
    #[error("STRUCTURE_ERROR: {0}")]
    Structure(String),

    /// A line item's link or label did not match its expected pattern.
    #[error("PARSE_ERROR: {what} did not match: {raw:?}")]
    Parse {
        /// Which part of the item failed (`href`, `text`, `anchor`).
        what: &'static str,
        /// The raw fragment as it appeared in the page.
        raw: String,
    },

    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Records could not be encoded for storage.
    #[error("CACHE_ERROR: serialization failed: {0}")]
    Serialization(String),
}

impl Error {
    /// Build a [`Error::Parse`] for the given item part and raw fragment.
    pub fn parse(what: &'static str, raw: impl Into<String>) -> Self {
        Error::Parse { what, raw: raw.into() }
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
