//! The saved-product board: newest-first cards and the click actions that
//! change them.

use wishcard_core::{OptionGroup, Product};

use crate::error::BoardError;
use crate::selection::{Transition, VariantSelector};

/// One displayed product and its chip selection.
#[derive(Debug, Clone)]
pub struct Card {
    product: Product,
    selector: VariantSelector,
}

impl Card {
    #[must_use]
    pub fn new(product: Product) -> Self {
        let selector = VariantSelector::new(&product);
        Self { product, selector }
    }

    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub fn selector(&self) -> &VariantSelector {
        &self.selector
    }

    /// Sold-out products and cards with a sold-out chip offer restock.
    #[must_use]
    pub fn offers_restock(&self) -> bool {
        self.product.offers_restock()
    }
}

/// A state-changing click on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectOption {
        source_url: String,
        group: OptionGroup,
        name: String,
    },
    Delete {
        source_url: String,
    },
    Restock {
        source_url: String,
    },
    ClearAll,
}

/// What the caller should do after a dispatched action.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Selection(Transition),
    /// The card was removed; the list should be persisted.
    Removed(Product),
    /// Open the product page so the user can sign up for a restock alert.
    OpenUrl(String),
    /// Number of cards removed.
    Cleared(usize),
}

impl Effect {
    /// `true` when the persisted list changed.
    #[must_use]
    pub fn mutates_list(&self) -> bool {
        matches!(self, Effect::Removed(_) | Effect::Cleared(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a board from a persisted list, keeping its order. Repeated
    /// URLs keep their first occurrence.
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut board = Self::new();
        for product in products {
            if board.contains(&product.source_url) {
                tracing::warn!(
                    source_url = %product.source_url,
                    "skipping repeated product in saved list"
                );
                continue;
            }
            board.cards.push(Card::new(product));
        }
        board
    }

    #[must_use]
    pub fn contains(&self, source_url: &str) -> bool {
        self.position(source_url).is_some()
    }

    /// Checks a submitted URL before any adapter output is consumed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateSubmission`] if the URL is already saved.
    pub fn ensure_not_saved(&self, source_url: &str) -> Result<(), BoardError> {
        if self.contains(source_url) {
            return Err(BoardError::DuplicateSubmission {
                source_url: source_url.to_string(),
            });
        }
        Ok(())
    }

    /// Puts `product` at the front of the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateSubmission`] if its URL is already saved.
    pub fn add(&mut self, product: Product) -> Result<&Card, BoardError> {
        self.ensure_not_saved(&product.source_url)?;
        tracing::info!(
            source_url = %product.source_url,
            title = %product.title,
            "product added to board"
        );
        self.cards.insert(0, Card::new(product));
        Ok(&self.cards[0])
    }

    /// Applies one click.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownProduct`] when the action names a URL that
    /// is not on the board.
    pub fn dispatch(&mut self, action: Action) -> Result<Effect, BoardError> {
        match action {
            Action::SelectOption {
                source_url,
                group,
                name,
            } => {
                let index = self.require(&source_url)?;
                let transition = self.cards[index].selector.select(group, &name);
                Ok(Effect::Selection(transition))
            }
            Action::Delete { source_url } => {
                let index = self.require(&source_url)?;
                let card = self.cards.remove(index);
                tracing::info!(source_url = %card.product.source_url, "product deleted");
                Ok(Effect::Removed(card.product))
            }
            Action::Restock { source_url } => {
                let index = self.require(&source_url)?;
                let card = &self.cards[index];
                if !card.offers_restock() {
                    tracing::debug!(
                        source_url = %card.product.source_url,
                        "restock requested for product without sold-out options"
                    );
                }
                Ok(Effect::OpenUrl(card.product.source_url.clone()))
            }
            Action::ClearAll => {
                let removed = self.cards.len();
                self.cards.clear();
                tracing::info!(removed, "board cleared");
                Ok(Effect::Cleared(removed))
            }
        }
    }

    #[must_use]
    pub fn card(&self, source_url: &str) -> Option<&Card> {
        self.position(source_url).map(|i| &self.cards[i])
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The persisted shape of the board, newest first.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.cards.iter().map(|c| c.product.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    fn position(&self, source_url: &str) -> Option<usize> {
        self.cards
            .iter()
            .position(|c| c.product.source_url == source_url)
    }

    fn require(&self, source_url: &str) -> Result<usize, BoardError> {
        self.position(source_url)
            .ok_or_else(|| BoardError::UnknownProduct {
                source_url: source_url.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "board_test.rs"]
mod tests;
