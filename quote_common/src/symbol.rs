//! Ticker symbols as received on the `/stock/{symbol}` route.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// A ticker symbol normalized to uppercase.
///
/// No format checking happens beyond rejecting the empty string: exchange
/// suffixes, index prefixes and unknown tickers are passed through unchanged and
/// any problem surfaces later as an extraction failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Normalizes `raw` to uppercase.
    pub fn new(raw: &str) -> Result<Self, QuoteError> {
        if raw.is_empty() {
            return Err(QuoteError::InvalidSymbol(raw.to_string()));
        }
        Ok(Symbol(raw.to_uppercase()))
    }

    /// The normalized symbol text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = QuoteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Symbol::new(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
