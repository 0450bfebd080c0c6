//! Applies an [`ExtractionSchema`] to rendered HTML.
//!
//! The output is the JSON text the orchestrator expects from the collaborator: an
//! array with one object per base-element match. Fields whose selector matches
//! nothing (and have no default) are left out of the object; objects left with no
//! fields at all are dropped.
use log::debug;
use quote_common::schema::{ExtractionSchema, FieldType, SchemaField};
use quote_common::{QuoteError, Result};
use scraper::{ElementRef, Html, Selector};
use serde_json::{Map, Value};

/// Compiled form of a [`SchemaField`].
struct CompiledField<'a> {
    field: &'a SchemaField,
    selector: Selector,
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| {
        QuoteError::Collaborator(format!("invalid selector '{}': {}", selector, e))
    })
}

/// Runs `schema` over `html` and returns the records as compact JSON.
pub fn extract_json(html: &str, schema: &ExtractionSchema) -> Result<String> {
    let records = extract_records(html, schema)?;
    Ok(serde_json::to_string(&records)?)
}

/// Runs `schema` over `html` and returns the records as JSON values.
pub fn extract_records(html: &str, schema: &ExtractionSchema) -> Result<Vec<Value>> {
    let base = compile(&schema.base_selector)?;
    let fields = schema
        .fields
        .iter()
        .map(|field| -> Result<CompiledField<'_>> {
            Ok(CompiledField {
                field,
                selector: compile(&field.selector)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let document = Html::parse_document(html);
    let mut records = Vec::new();

    for element in document.select(&base) {
        let mut record = Map::new();
        for compiled in &fields {
            let value = element
                .select(&compiled.selector)
                .next()
                .and_then(|matched| read_field(matched, compiled.field))
                .or_else(|| compiled.field.default.clone());
            if let Some(value) = value {
                record.insert(compiled.field.name.clone(), Value::String(value));
            }
        }
        if !record.is_empty() {
            records.push(Value::Object(record));
        }
    }

    debug!(
        "Schema '{}' produced {} record(s)",
        schema.base_selector,
        records.len()
    );
    Ok(records)
}

fn read_field(element: ElementRef<'_>, field: &SchemaField) -> Option<String> {
    match field.kind {
        FieldType::Text => Some(element.text().collect::<String>().trim().to_string()),
        FieldType::Html => Some(element.html()),
        FieldType::Attribute => field
            .attribute
            .as_deref()
            .and_then(|name| element.value().attr(name))
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const QUOTE_PAGE: &str = r#"
        <html><body>
          <div class="header"><span>Yahoo Finance</span></div>
          <section>
            <div class="container yf-16vvaki">
              <span data-testid="qsp-price"> 189.50 </span>
              <span>+1.25</span>
            </div>
          </section>
        </body></html>
    "#;

    #[test]
    fn extracts_price_from_quote_markup() {
        let json = extract_json(QUOTE_PAGE, &ExtractionSchema::quote_price()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, json!([{"price": "189.50"}]));
    }

    #[test]
    fn stale_markup_yields_empty_array() {
        let html = "<html><body><div class='container yf-other'><span>1</span></div></body></html>";
        let json = extract_json(html, &ExtractionSchema::quote_price()).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn base_without_field_match_is_dropped() {
        let html = r#"<div class="container yf-16vvaki"><p>no span</p></div>
                      <div class="container yf-16vvaki"><span>42.00</span></div>"#;
        let records = extract_records(html, &ExtractionSchema::quote_price()).unwrap();
        assert_eq!(records, vec![json!({"price": "42.00"})]);
    }

    #[test]
    fn empty_text_is_kept_as_empty_string() {
        let html = r#"<div class="container yf-16vvaki"><span>  </span></div>"#;
        let records = extract_records(html, &ExtractionSchema::quote_price()).unwrap();
        assert_eq!(records, vec![json!({"price": ""})]);
    }

    #[test]
    fn attribute_html_and_default_fields() {
        let mut label = SchemaField::text("label", "em");
        label.default = Some("n/a".to_string());
        let mut markup = SchemaField::text("markup", "b");
        markup.kind = FieldType::Html;
        let schema = ExtractionSchema {
            base_selector: "li".to_string(),
            fields: vec![SchemaField::attribute("link", "a", "href"), label, markup],
        };
        let html = r#"<ul><li><a href="/quote/AAPL/">Apple</a><b>Buy</b></li></ul>"#;
        let records = extract_records(html, &schema).unwrap();
        assert_eq!(
            records,
            vec![json!({"link": "/quote/AAPL/", "label": "n/a", "markup": "<b>Buy</b>"})]
        );
    }

    #[test]
    fn invalid_selector_is_a_collaborator_error() {
        let schema = ExtractionSchema {
            base_selector: "div[".to_string(),
            fields: vec![],
        };
        let err = extract_json("<div></div>", &schema).unwrap_err();
        assert!(matches!(err, QuoteError::Collaborator(ref msg) if msg.contains("div[")));
    }
}
