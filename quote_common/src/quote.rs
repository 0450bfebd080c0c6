//! JSON bodies returned by the HTTP API.
//!
//! Every success body is one of the structs below; every failure body is an
//! [`ErrorDetail`]. Field names are part of the public contract.
use serde::{Deserialize, Serialize};

use crate::symbol::Symbol;

/// Text returned by `GET /`.
pub const WELCOME_MESSAGE: &str =
    "Welcome to the Real-Time Stock Price API. Use /stock/{symbol} to get prices.";

/// Latest price for a single ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockQuote {
    /// Uppercase-normalized ticker symbol.
    pub symbol: String,
    /// Price text exactly as displayed on the quote page (e.g. `"189.50"`).
    pub price: String,
}

impl StockQuote {
    /// Builds a quote for an already-normalized symbol.
    pub fn new(symbol: &Symbol, price: impl Into<String>) -> Self {
        StockQuote {
            symbol: symbol.to_string(),
            price: price.into(),
        }
    }
}

/// Failure body: `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable description of the failure.
    pub detail: String,
}

impl ErrorDetail {
    /// Wraps any displayable error as a detail body.
    pub fn new(detail: impl ToString) -> Self {
        ErrorDetail {
            detail: detail.to_string(),
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeMessage {
    /// Fixed greeting pointing at the quote route.
    pub message: String,
}

impl Default for WelcomeMessage {
    fn default() -> Self {
        WelcomeMessage {
            message: WELCOME_MESSAGE.to_string(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always `"healthy"` while the process is serving requests.
    pub status: String,
}

impl HealthStatus {
    /// The liveness payload.
    pub fn healthy() -> Self {
        HealthStatus {
            status: "healthy".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quote_serializes_to_contract_shape() {
        let symbol = Symbol::new("msft").unwrap();
        let quote = StockQuote::new(&symbol, "189.50");
        assert_eq!(
            serde_json::to_value(&quote).unwrap(),
            json!({"symbol": "MSFT", "price": "189.50"})
        );
    }

    #[test]
    fn static_bodies() {
        assert_eq!(
            serde_json::to_value(HealthStatus::healthy()).unwrap(),
            json!({"status": "healthy"})
        );
        assert_eq!(
            serde_json::to_value(ErrorDetail::new("Not Found")).unwrap(),
            json!({"detail": "Not Found"})
        );
        assert!(WelcomeMessage::default().message.contains("/stock/{symbol}"));
    }
}
