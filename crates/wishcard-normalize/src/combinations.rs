//! Per-(color, size) availability.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use serde_json::Value;
use wishcard_core::Combination;

use crate::options::object_is_sold_out;
use crate::raw::{first_key, text};

/// Result of a [`CombinationIndex::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    SoldOut,
    Available,
    /// The pair never appeared in the raw data; availability is unconstrained.
    Unknown,
}

/// Parses a raw combinations array.
///
/// Accepts `{color, size, isSoldOut}` entries as well as Naver option combos
/// (`optionName1` = color, `optionName2` = size, `stockQuantity`). Entries
/// missing either side are dropped, and so are repeated pairs (first wins).
#[must_use]
pub fn parse_combinations(value: &Value) -> Vec<Combination> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut combinations = Vec::with_capacity(items.len());
    let mut dropped = 0usize;

    for item in items {
        let color = first_key(item, &["color", "optionName1"]).and_then(text);
        let size = first_key(item, &["size", "optionName2"]).and_then(text);
        let (Some(color), Some(size)) = (color, size) else {
            dropped += 1;
            continue;
        };
        if !seen.insert(pair_key(&color, &size)) {
            dropped += 1;
            continue;
        }
        combinations.push(Combination {
            is_sold_out: object_is_sold_out(item),
            color,
            size,
        });
    }

    if dropped > 0 {
        tracing::debug!(dropped, kept = combinations.len(), "dropped raw combinations");
    }
    combinations
}

/// Read-only lookup from (color, size) to sold-out state. Built once per
/// product by whoever needs it; never stored on the product.
#[derive(Debug, Clone, Default)]
pub struct CombinationIndex {
    entries: HashMap<(String, String), bool>,
}

impl CombinationIndex {
    /// Builds the index. For repeated pairs the first entry wins.
    #[must_use]
    pub fn build(combinations: &[Combination]) -> Self {
        let mut entries = HashMap::with_capacity(combinations.len());
        for c in combinations {
            if c.color.trim().is_empty() || c.size.trim().is_empty() {
                continue;
            }
            if let Entry::Vacant(slot) = entries.entry(pair_key(&c.color, &c.size)) {
                slot.insert(c.is_sold_out);
            }
        }
        Self { entries }
    }

    /// Names compare trimmed and case-insensitively, like option dedup.
    #[must_use]
    pub fn lookup(&self, color: &str, size: &str) -> Availability {
        match self.entries.get(&pair_key(color, size)) {
            Some(true) => Availability::SoldOut,
            Some(false) => Availability::Available,
            None => Availability::Unknown,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn pair_key(color: &str, size: &str) -> (String, String) {
    (color.trim().to_lowercase(), size.trim().to_lowercase())
}
