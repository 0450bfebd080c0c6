//! Route handlers and error translation.
use std::borrow::Cow;
use std::convert::Infallible;
use std::sync::Arc;

use log::{error, warn};
use quote_common::quote::{ErrorDetail, HealthStatus, WelcomeMessage};
use quote_common::{QuoteError, Symbol};
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::{Rejection, Reply};

use super::openapi;
use crate::quote_scraper::QuoteScraper;

/// `GET /`
pub fn welcome() -> impl Reply {
    reply::json(&WelcomeMessage::default())
}

/// `GET /health`
pub fn health() -> impl Reply {
    reply::json(&HealthStatus::healthy())
}

/// `GET /openapi.json`
pub fn openapi_document() -> impl Reply {
    reply::json(&openapi::document())
}

/// `GET /docs`
pub fn docs() -> impl Reply {
    reply::html(openapi::SWAGGER_UI)
}

/// `GET /stock/{symbol}`
///
/// The path segment is percent-decoded and uppercased; nothing else is validated.
pub async fn stock_price(
    raw_symbol: String,
    scraper: Arc<QuoteScraper>,
) -> Result<Response, Infallible> {
    let decoded = urlencoding::decode(&raw_symbol)
        .map(Cow::into_owned)
        .unwrap_or(raw_symbol);

    let symbol = match Symbol::new(&decoded) {
        Ok(symbol) => symbol,
        Err(e) => return Ok(error_response(&e)),
    };

    match scraper.fetch_quote(&symbol).await {
        Ok(quote) => Ok(reply::json(&quote).into_response()),
        Err(e) => {
            error!("Error during crawl for {}: {}", symbol, e);
            Ok(error_response(&e))
        }
    }
}

/// HTTP status for a failed lookup.
pub fn status_for(err: &QuoteError) -> StatusCode {
    if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// `{"detail": ...}` reply for a failed lookup.
pub fn error_response(err: &QuoteError) -> Response {
    detail_response(status_for(err), err.to_string())
}

fn detail_response(status: StatusCode, detail: impl ToString) -> Response {
    reply::with_status(reply::json(&ErrorDetail::new(detail)), status).into_response()
}

/// Turns unmatched requests into JSON `detail` replies.
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    if err.is_not_found() {
        return Ok(detail_response(StatusCode::NOT_FOUND, "Not Found"));
    }
    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        return Ok(detail_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method Not Allowed",
        ));
    }
    warn!("Unhandled rejection: {:?}", err);
    Ok(detail_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_common::NotFoundReason;

    #[test]
    fn status_mapping() {
        assert_eq!(
            status_for(&QuoteError::NotFound(NotFoundReason::NoContent)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&QuoteError::NotFound(NotFoundReason::PriceMissing)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&QuoteError::collaborator("crashed")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            status_for(&QuoteError::from(parse)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
