//! Networking defaults and the quote page address.

use crate::symbol::Symbol;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8000;
/// Listen on all interfaces by default.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Prefix of the per-symbol quote page scraped for prices.
pub const QUOTE_PAGE_BASE: &str = "https://finance.yahoo.com/quote/";

/// Helper to format an address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// Quote page for `symbol`, e.g. `https://finance.yahoo.com/quote/AAPL/`.
pub fn quote_page_url(symbol: &Symbol) -> String {
    format!("{}{}/", QUOTE_PAGE_BASE, symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_url_uses_normalized_symbol() {
        let symbol = Symbol::new("aapl").unwrap();
        assert_eq!(quote_page_url(&symbol), "https://finance.yahoo.com/quote/AAPL/");
    }

    #[test]
    fn formats_bind_address() {
        assert_eq!(addr(DEFAULT_HOST, DEFAULT_PORT), "0.0.0.0:8000");
    }
}
