//! Per-card chip selection.
//!
//! Colors and sizes are single-select rows. Picking a color narrows the size
//! row through the product's combination table: sizes sold out in that
//! color are disabled (and deselected), sizes in stock are enabled, and
//! sizes the table says nothing about fall back to their own flag.

use std::cell::OnceCell;
use std::collections::HashMap;

use serde::Serialize;
use wishcard_core::{Combination, OptionGroup, Product, VariantOption};
use wishcard_normalize::{Availability, CombinationIndex};

/// Current chip selection of one card. Ephemeral; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub selected_color: Option<String>,
    pub selected_size: Option<String>,
}

impl SelectionState {
    #[must_use]
    pub fn selected(&self, group: OptionGroup) -> Option<&str> {
        match group {
            OptionGroup::Color => self.selected_color.as_deref(),
            OptionGroup::Size => self.selected_size.as_deref(),
        }
    }

    fn slot_mut(&mut self, group: OptionGroup) -> &mut Option<String> {
        match group {
            OptionGroup::Color => &mut self.selected_color,
            OptionGroup::Size => &mut self.selected_size,
        }
    }
}

/// Outcome of one chip click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    /// No chip with that name in the group.
    Ignored,
    /// The chip is sold out; nothing changed.
    Rejected,
    /// The chip was already selected and has been toggled off.
    Cleared,
    Selected,
}

/// View of one chip as the card should render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chip {
    pub name: String,
    pub is_sold_out: bool,
    pub is_selected: bool,
}

#[derive(Debug, Clone)]
pub struct VariantSelector {
    colors: Vec<VariantOption>,
    sizes: Vec<VariantOption>,
    combinations: Vec<Combination>,
    index: OnceCell<CombinationIndex>,
    state: SelectionState,
    /// Forced sold-out state per size, keyed by lowercased name. Set by the
    /// most recent color selection.
    size_overrides: HashMap<String, bool>,
}

impl VariantSelector {
    #[must_use]
    pub fn new(product: &Product) -> Self {
        Self {
            colors: product.colors.clone(),
            sizes: product.sizes.clone(),
            combinations: product.combinations.clone(),
            index: OnceCell::new(),
            state: SelectionState::default(),
            size_overrides: HashMap::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Handles a click on the `name` chip of `group`.
    pub fn select(&mut self, group: OptionGroup, name: &str) -> Transition {
        let Some(option) = find_option(self.options(group), name) else {
            tracing::debug!(%group, name, "click on unknown chip ignored");
            return Transition::Ignored;
        };
        let option_name = option.name.clone();
        let sold_out = self.effective_sold_out(option);

        let already_selected = self
            .state
            .selected(group)
            .is_some_and(|current| same_name(current, &option_name));

        // A selected chip can always be toggled off, even if it has since
        // become sold out.
        if already_selected {
            *self.state.slot_mut(group) = None;
            tracing::debug!(%group, name = %option_name, "chip toggled off");
            return Transition::Cleared;
        }

        if sold_out {
            tracing::debug!(%group, name = %option_name, "click on sold-out chip rejected");
            return Transition::Rejected;
        }

        *self.state.slot_mut(group) = Some(option_name.clone());
        if group == OptionGroup::Color {
            self.apply_color_constraints(&option_name);
        }
        tracing::debug!(%group, name = %option_name, "chip selected");
        Transition::Selected
    }

    /// Chips of one row with their effective sold-out and selected state.
    #[must_use]
    pub fn chips(&self, group: OptionGroup) -> Vec<Chip> {
        let selected = self.state.selected(group);
        self.options(group)
            .iter()
            .map(|option| Chip {
                name: option.name.clone(),
                is_sold_out: self.effective_sold_out(option),
                is_selected: selected.is_some_and(|s| same_name(s, &option.name)),
            })
            .collect()
    }

    fn options(&self, group: OptionGroup) -> &[VariantOption] {
        match group {
            OptionGroup::Color => &self.colors,
            OptionGroup::Size => &self.sizes,
        }
    }

    fn index(&self) -> &CombinationIndex {
        self.index
            .get_or_init(|| CombinationIndex::build(&self.combinations))
    }

    fn effective_sold_out(&self, option: &VariantOption) -> bool {
        match option.group {
            OptionGroup::Color => option.is_sold_out,
            OptionGroup::Size => self
                .size_overrides
                .get(&option_key(&option.name))
                .copied()
                .unwrap_or(option.is_sold_out),
        }
    }

    fn apply_color_constraints(&mut self, color: &str) {
        let mut overrides = HashMap::with_capacity(self.sizes.len());
        for size in &self.sizes {
            match self.index().lookup(color, &size.name) {
                Availability::SoldOut => {
                    overrides.insert(option_key(&size.name), true);
                }
                Availability::Available => {
                    overrides.insert(option_key(&size.name), false);
                }
                Availability::Unknown => {}
            }
        }
        self.size_overrides = overrides;

        // The selected size must stay selectable under the new overrides,
        // including one that reverted to a sold-out baseline.
        let selected_now_sold_out = self.state.selected_size.as_deref().is_some_and(|selected| {
            find_option(&self.sizes, selected).is_some_and(|size| self.effective_sold_out(size))
        });
        if selected_now_sold_out {
            tracing::debug!(color, "selected size sold out in new color, clearing");
            self.state.selected_size = None;
        }
    }
}

fn option_key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn same_name(a: &str, b: &str) -> bool {
    option_key(a) == option_key(b)
}

fn find_option<'a>(options: &'a [VariantOption], name: &str) -> Option<&'a VariantOption> {
    options.iter().find(|o| same_name(&o.name, name))
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
