//! Declarative CSS extraction schema.
//!
//! A schema names a base selector and a list of fields. Every element matching the
//! base selector yields one JSON record; each field is resolved relative to that
//! element. Serialized as `{"baseSelector", "fields": [{"name", "selector", "type"}]}`.
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Container holding the live price on the quote page.
pub const PRICE_BASE_SELECTOR: &str = "div.container.yf-16vvaki";
/// Price element inside [`PRICE_BASE_SELECTOR`].
pub const PRICE_SELECTOR: &str = "span";
/// Record key the orchestrator reads the price from.
pub const PRICE_FIELD: &str = "price";

/// How a field value is read from the matched element.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FieldType {
    /// Trimmed text content.
    #[default]
    Text,
    /// Outer HTML of the element.
    Html,
    /// Value of the attribute named by [`SchemaField::attribute`].
    Attribute,
}

/// One named output field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Key of the value in the output record.
    pub name: String,
    /// Selector evaluated relative to the base element; the first match wins.
    pub selector: String,
    /// Extraction mode.
    #[serde(rename = "type", default)]
    pub kind: FieldType,
    /// Attribute name, required when `kind` is [`FieldType::Attribute`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Value used when the selector matches nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl SchemaField {
    /// A text field.
    pub fn text(name: &str, selector: &str) -> Self {
        SchemaField {
            name: name.to_string(),
            selector: selector.to_string(),
            kind: FieldType::Text,
            attribute: None,
            default: None,
        }
    }

    /// An attribute field.
    pub fn attribute(name: &str, selector: &str, attribute: &str) -> Self {
        SchemaField {
            name: name.to_string(),
            selector: selector.to_string(),
            kind: FieldType::Attribute,
            attribute: Some(attribute.to_string()),
            default: None,
        }
    }
}

/// Selector tree describing one kind of record on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSchema {
    /// Selector for the elements that each produce one record.
    pub base_selector: String,
    /// Fields extracted from every base element.
    pub fields: Vec<SchemaField>,
}

impl ExtractionSchema {
    /// Schema locating the live price on a Yahoo Finance quote page.
    pub fn quote_price() -> Self {
        ExtractionSchema {
            base_selector: PRICE_BASE_SELECTOR.to_string(),
            fields: vec![SchemaField::text(PRICE_FIELD, PRICE_SELECTOR)],
        }
    }
}
