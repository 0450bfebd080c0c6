//! Error types shared by the server and its collaborators.
//!
//! `QuoteError` classifies every way a price lookup can fail. The HTTP layer maps
//! the classes onto status codes; the `Display` text of each variant is exactly the
//! `detail` string returned to callers.
use std::fmt;
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Why a lookup produced no price.
///
/// Both reasons surface as HTTP 404 but point at different root causes: an empty
/// payload usually means the site was unreachable or blocked the browser, while a
/// missing field means the extraction schema no longer matches the page markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The collaborator returned no extracted content at all.
    NoContent,
    /// Content was extracted but the first record carried no usable price.
    PriceMissing,
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundReason::NoContent => f.write_str("Price not found for the given symbol."),
            NotFoundReason::PriceMissing => f.write_str("Price not found in the extracted data."),
        }
    }
}

/// Unified error type for lookups, extraction and service bootstrap.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// No price could be located for the requested symbol.
    #[error("{0}")]
    NotFound(NotFoundReason),

    /// The extracted payload is not the expected JSON array of records.
    #[error("Failed to parse extracted data: {0}")]
    Extraction(#[from] serde_json::Error),

    /// Any failure raised by the browser/extraction collaborator itself
    /// (launch, navigation, script evaluation, selector compilation).
    #[error("Error fetching stock price: {0}")]
    Collaborator(String),

    /// The requested symbol is empty.
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    /// I/O error while binding sockets or writing log files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Startup configuration could not be applied.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl QuoteError {
    /// Wraps any collaborator failure, keeping only its message.
    pub fn collaborator(err: impl fmt::Display) -> Self {
        QuoteError::Collaborator(err.to_string())
    }

    /// `true` for the failures that mean "nothing to return" rather than "something broke".
    pub fn is_not_found(&self) -> bool {
        matches!(self, QuoteError::NotFound(_) | QuoteError::InvalidSymbol(_))
    }
}

impl<T> From<PoisonError<T>> for QuoteError {
    fn from(err: PoisonError<T>) -> Self {
        QuoteError::MutexLock(err.to_string())
    }
}
