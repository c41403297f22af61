//! First-present-wins field resolution over an ordered strategy chain.
//!
//! Each [`Strategy`] is a plain function over the raw record that either
//! returns a value or `None`; none of them panic on missing or mistyped
//! input. Strategies are never merged: the first usable value is the answer.

use wishcard_core::Combination;

use crate::options::RawOption;
use crate::raw::RawSourceRecord;

/// One named extraction step in a fallback chain.
#[derive(Clone, Copy)]
pub struct Strategy<T> {
    /// Short label for logs, e.g. `"structured_data.name"`.
    pub name: &'static str,
    pub extract: fn(&RawSourceRecord) -> Option<T>,
}

impl<T> std::fmt::Debug for Strategy<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name).finish()
    }
}

/// Whether an extracted value is good enough to stop the chain.
pub trait Usable {
    fn is_usable(&self) -> bool;
}

impl Usable for String {
    fn is_usable(&self) -> bool {
        !self.trim().is_empty()
    }
}

/// Prices are validated (non-zero) by [`crate::price::parse_price`].
impl Usable for u64 {
    fn is_usable(&self) -> bool {
        true
    }
}

/// An explicit flag either way is an answer.
impl Usable for bool {
    fn is_usable(&self) -> bool {
        true
    }
}

impl Usable for Vec<RawOption> {
    fn is_usable(&self) -> bool {
        self.iter().any(|o| !o.name.trim().is_empty())
    }
}

impl Usable for Vec<Combination> {
    fn is_usable(&self) -> bool {
        !self.is_empty()
    }
}

/// Evaluates `chain` in order and returns the first usable value.
///
/// `field` only labels the trace output.
pub fn resolve_field<T: Usable>(
    field: &str,
    raw: &RawSourceRecord,
    chain: &[Strategy<T>],
) -> Option<T> {
    let resolved = chain.iter().find_map(|strategy| {
        let value = (strategy.extract)(raw).filter(Usable::is_usable)?;
        tracing::trace!(field, strategy = strategy.name, "field resolved");
        Some(value)
    });
    if resolved.is_none() {
        tracing::debug!(field, strategies = chain.len(), "field absent from every source");
    }
    resolved
}
