//! Color and size option lists.
//!
//! Raw option lists come in two shapes: arrays of chip text scraped from the
//! page (`["S", "M (품절)", "사이즈 선택"]`) and arrays of objects from site
//! state (`{"name": "M", "stockQty": 0}`, `{"nm": "L", "soldOutYn": "Y"}`,
//! Naver's `{"optionName1": "Black", "optionName2": "M", "stockQuantity": 3}`).
//! [`parse_raw_options`] flattens both into [`RawOption`]s;
//! [`normalize_options`] then dedups them into chips.

use std::collections::HashSet;

use serde_json::Value;
use wishcard_core::{OptionGroup, VariantOption};

use crate::raw::{first_key, text};
use crate::text::{is_placeholder_option, split_sold_out_marker};

/// One option as scraped, before trimming and dedup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOption {
    pub name: String,
    pub is_sold_out: bool,
}

impl RawOption {
    #[must_use]
    pub fn new(name: impl Into<String>, is_sold_out: bool) -> Self {
        Self {
            name: name.into(),
            is_sold_out,
        }
    }
}

/// Flattens a raw option array. Anything that is not an array, and any entry
/// without a name, yields nothing.
#[must_use]
pub fn parse_raw_options(value: &Value) -> Vec<RawOption> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(_) | Value::Number(_) => {
                let raw = text(item)?;
                raw_option_from_text(&raw, false)
            }
            Value::Object(_) => {
                let raw = object_option_name(item)?;
                raw_option_from_text(&raw, object_is_sold_out(item))
            }
            _ => None,
        })
        .collect()
}

fn raw_option_from_text(raw: &str, flagged_sold_out: bool) -> Option<RawOption> {
    if is_placeholder_option(raw) {
        return None;
    }
    let (name, marked) = split_sold_out_marker(raw);
    Some(RawOption::new(name, flagged_sold_out || marked))
}

fn object_option_name(item: &Value) -> Option<String> {
    if let Some(name) = first_key(item, &["name", "nm", "optionValue"]).and_then(text) {
        return Some(name);
    }

    let parts: Vec<String> = ["optionName1", "optionName2"]
        .iter()
        .filter_map(|key| item.get(*key).and_then(text))
        .collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}

/// Stock fields that are missing are read as available.
pub(crate) fn object_is_sold_out(item: &Value) -> bool {
    let flag = first_key(item, &["isSoldOut", "soldOut"])
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let yn = item
        .get("soldOutYn")
        .and_then(Value::as_str)
        .is_some_and(|s| s.eq_ignore_ascii_case("y"));
    let out_of_stock = first_key(item, &["stockQty", "stockQuantity"])
        .and_then(Value::as_i64)
        .is_some_and(|qty| qty <= 0);

    flag || yn || out_of_stock
}

/// Normalizes raw options into chips for `group`.
///
/// Names are trimmed and empty names dropped. Duplicates are detected
/// case-insensitively; the first occurrence wins, including its sold-out
/// flag. First-seen order is preserved. Returns an empty vector (never
/// absent) when nothing usable remains.
#[must_use]
pub fn normalize_options(raw: &[RawOption], group: OptionGroup) -> Vec<VariantOption> {
    let mut seen = HashSet::new();
    let mut options = Vec::with_capacity(raw.len());

    for option in raw {
        let name = option.name.trim();
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name.to_lowercase()) {
            tracing::trace!(%group, name, "dropping duplicate option");
            continue;
        }
        options.push(VariantOption {
            name: name.to_string(),
            is_sold_out: option.is_sold_out,
            group,
        });
    }

    options
}
