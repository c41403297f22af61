//! Raw adapter output.
//!
//! ## Observed shape
//!
//! The page adapter returns a single JSON object per request. Every key is
//! optional and may carry an unexpected type:
//!
//! - `structuredData`: the schema.org `Product` from a JSON-LD block. Some
//!   adapters hand over the whole block, so arrays and `@graph` containers are
//!   searched for the first `Product` node.
//! - `siteState`: the site's global product state (`__MSS__` product state on
//!   Musinsa, `__PRELOADED_STATE__.product.A` on Naver).
//! - `embeddedJson`: the raw `__NEXT_DATA__` blob. The product object sits at
//!   one of several paths depending on the page generation.
//! - `meta`: `og:title`, `og:image` and `product:sale_price:amount` contents.
//! - `pageTitle`: `document.title`.
//! - Top-level `title`, `price`, `price_final`, `price_original`,
//!   `couponPrice`, `image`, `sizes`, `colors`, `combinations`: plain selector
//!   results, exactly as the crawler scripts print them.
//!
//! A failed adapter run prints `{"error": "...", "detail": "..."}` instead.

use serde_json::{Map, Value};

use crate::error::NormalizeError;

/// Paths under `embeddedJson` where the product object has been observed.
const EMBEDDED_PRODUCT_PATHS: &[&[&str]] = &[
    &["props", "pageProps", "product"],
    &["props", "pageProps", "initialState", "product"],
    &["props", "pageProps", "state", "product"],
    &["props", "pageProps", "state", "goods"],
    &["props", "pageProps", "initialState", "goods"],
];

/// One best-effort, partially populated record from the page adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSourceRecord {
    fields: Map<String, Value>,
}

impl RawSourceRecord {
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns a top-level field, treating JSON `null` as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// The JSON-LD `Product` node, if the adapter captured one.
    #[must_use]
    pub fn structured_data(&self) -> Option<&Value> {
        self.get("structuredData").and_then(find_product_node)
    }

    #[must_use]
    pub fn site_state(&self) -> Option<&Value> {
        self.get("siteState").filter(|v| v.is_object())
    }

    /// The product object inside the embedded `__NEXT_DATA__` blob.
    #[must_use]
    pub fn embedded_product(&self) -> Option<&Value> {
        let root = self.get("embeddedJson")?;
        EMBEDDED_PRODUCT_PATHS
            .iter()
            .find_map(|path| lookup(root, path).filter(|v| v.is_object()))
    }

    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.get("meta").and_then(|m| m.get(key)).filter(|v| !v.is_null())
    }
}

/// Result of one adapter invocation, consumed atomically.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterResponse {
    Record(RawSourceRecord),
    Failure { error: String, detail: Option<String> },
}

impl AdapterResponse {
    /// Classifies an adapter JSON value. An object carrying a non-null
    /// `error` key is a failure; any other object is a record.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::UnexpectedShape`] if `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self, NormalizeError> {
        let Value::Object(fields) = value else {
            return Err(NormalizeError::UnexpectedShape {
                found: json_kind(&value).to_string(),
            });
        };

        match fields.get("error") {
            None | Some(Value::Null) => Ok(Self::Record(RawSourceRecord::new(fields))),
            Some(error) => {
                let error = match error {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                let detail = fields
                    .get("detail")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Ok(Self::Failure { error, detail })
            }
        }
    }

    /// Parses and classifies raw adapter output.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Deserialize`] for invalid JSON and
    /// [`NormalizeError::UnexpectedShape`] for non-object JSON.
    pub fn from_json_str(json: &str) -> Result<Self, NormalizeError> {
        let value: Value =
            serde_json::from_str(json).map_err(|source| NormalizeError::Deserialize {
                context: "adapter output".to_string(),
                source,
            })?;
        Self::from_value(value)
    }
}

/// Walks `path` through nested objects.
#[must_use]
pub fn lookup<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(root, |node, key| node.get(key))
        .filter(|v| !v.is_null())
}

/// Returns the first of `keys` present (non-null) on `node`.
#[must_use]
pub fn first_key<'a>(node: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| node.get(key).filter(|v| !v.is_null()))
}

/// Reads a scalar as trimmed, non-empty text. Numbers are rendered as-is.
#[must_use]
pub fn text(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

fn find_product_node(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(_) if is_product_type(value) => Some(value),
        Value::Object(map) => map
            .get("@graph")
            .and_then(Value::as_array)
            .and_then(|graph| graph.iter().find(|v| is_product_type(v)))
            // A bare object without `@type` is taken at face value.
            .or_else(|| {
                (!map.contains_key("@type") && !map.contains_key("@graph")).then_some(value)
            }),
        Value::Array(items) => items.iter().find_map(find_product_node),
        _ => None,
    }
}

fn is_product_type(value: &Value) -> bool {
    let is_product = |s: &str| s == "Product" || s == "https://schema.org/Product";
    match value.get("@type") {
        Some(Value::String(s)) => is_product(s),
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).any(is_product),
        _ => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
