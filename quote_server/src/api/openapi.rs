//! OpenAPI description of the service and the Swagger UI page serving it.
use serde_json::{Value, json};

/// API title shown in the docs.
pub const TITLE: &str = "Real-Time Stock Price API";
/// API description shown in the docs.
pub const DESCRIPTION: &str = "Fetch real-time stock prices from Yahoo Finance with near unlimited requests. ~5-second latency. Ideal for portfolio tracking, research, or educational use. Not suitable for high-frequency trading.";

/// Swagger UI page loading `/openapi.json`.
pub const SWAGGER_UI: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Real-Time Stock Price API - Swagger UI</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({ url: '/openapi.json', dom_id: '#swagger-ui' });
  </script>
</body>
</html>
"#;

fn json_response(description: &str, schema: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": format!("#/components/schemas/{}", schema) }
            }
        }
    })
}

/// OpenAPI 3 document for every route.
pub fn document() -> Value {
    json!({
        "openapi": "3.1.0",
        "info": {
            "title": TITLE,
            "description": DESCRIPTION,
            "version": env!("CARGO_PKG_VERSION")
        },
        "tags": [
            { "name": "Stock Prices", "description": "Endpoints to fetch stocks and ETFs prices." },
            { "name": "Health", "description": "Check API health status." },
            { "name": "Default", "description": "Service information." }
        ],
        "paths": {
            "/": {
                "get": {
                    "tags": ["Default"],
                    "summary": "Read Root",
                    "responses": { "200": json_response("Welcome message", "WelcomeMessage") }
                }
            },
            "/health": {
                "get": {
                    "tags": ["Health"],
                    "summary": "Health Check",
                    "responses": { "200": json_response("Service is up", "HealthStatus") }
                }
            },
            "/stock/{symbol}": {
                "get": {
                    "tags": ["Stock Prices"],
                    "summary": "Get Stock Price",
                    "description": "Fetch the real-time stock price for a given symbol, supports ETFs. ~5-second latency.",
                    "parameters": [{
                        "name": "symbol",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "string", "title": "Symbol" }
                    }],
                    "responses": {
                        "200": json_response("Current price", "StockQuote"),
                        "404": json_response("Price not found", "ErrorDetail"),
                        "500": json_response("Extraction or browser failure", "ErrorDetail")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "StockQuote": {
                    "type": "object",
                    "required": ["symbol", "price"],
                    "properties": {
                        "symbol": { "type": "string" },
                        "price": { "type": "string" }
                    }
                },
                "ErrorDetail": {
                    "type": "object",
                    "required": ["detail"],
                    "properties": { "detail": { "type": "string" } }
                },
                "WelcomeMessage": {
                    "type": "object",
                    "properties": { "message": { "type": "string" } }
                },
                "HealthStatus": {
                    "type": "object",
                    "properties": { "status": { "type": "string" } }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = document();
        let paths = doc["paths"].as_object().unwrap();
        for route in ["/", "/health", "/stock/{symbol}"] {
            assert!(paths.contains_key(route), "missing {}", route);
        }
        assert_eq!(doc["info"]["title"], TITLE);
        assert_eq!(doc["info"]["version"], "1.0.0");
    }

    fn collect_refs<'a>(value: &'a Value, refs: &mut Vec<&'a str>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    match (key.as_str(), child.as_str()) {
                        ("$ref", Some(target)) => refs.push(target),
                        _ => collect_refs(child, refs),
                    }
                }
            }
            Value::Array(items) => items.iter().for_each(|item| collect_refs(item, refs)),
            _ => {}
        }
    }

    #[test]
    fn every_ref_targets_a_defined_schema() {
        let doc = document();
        let schemas = doc["components"]["schemas"].as_object().unwrap();
        let mut refs = Vec::new();
        collect_refs(&doc["paths"], &mut refs);
        assert!(!refs.is_empty());
        for target in refs {
            let name = target
                .strip_prefix("#/components/schemas/")
                .unwrap_or_else(|| panic!("unexpected ref {}", target));
            assert!(schemas.contains_key(name), "dangling ref {}", target);
        }
    }

    #[test]
    fn every_operation_tag_is_declared() {
        let doc = document();
        let declared: Vec<&str> = doc["tags"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|tag| tag["name"].as_str())
            .collect();
        assert_eq!(declared, ["Stock Prices", "Health", "Default"]);
        for (route, item) in doc["paths"].as_object().unwrap() {
            for tag in item["get"]["tags"].as_array().unwrap() {
                let tag = tag.as_str().unwrap();
                assert!(declared.contains(&tag), "{} uses undeclared tag {}", route, tag);
            }
        }
    }
}
