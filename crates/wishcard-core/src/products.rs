use serde::{Deserialize, Serialize};

/// Which chip row a [`VariantOption`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionGroup {
    Color,
    Size,
}

impl std::fmt::Display for OptionGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionGroup::Color => write!(f, "color"),
            OptionGroup::Size => write!(f, "size"),
        }
    }
}

/// A product reconciled from whatever raw sources the page adapter managed to
/// capture, ready to be rendered as a card or persisted in the saved list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Display title. Never empty; falls back to the configured default.
    pub title: String,
    /// The URL the user submitted. Identity key of the saved list.
    pub source_url: String,
    /// Site key resolved from `source_url`, e.g. `"musinsa"` or `"shop"`.
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Current selling price in won.
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub price_formatted: Option<String>,
    /// Price after the site's coupon, when the page advertises one.
    #[serde(default)]
    pub coupon_price: Option<u64>,
    #[serde(default)]
    pub coupon_price_formatted: Option<String>,
    /// List (pre-sale) price, e.g. Musinsa's `consumerPrice`.
    #[serde(default)]
    pub original_price: Option<u64>,
    #[serde(default)]
    pub original_price_formatted: Option<String>,
    /// Whole-number percentage. Present only when the original price is
    /// strictly greater than the final price.
    #[serde(default)]
    pub discount_rate: Option<u8>,
    /// The whole product is sold out, independent of any chip.
    #[serde(default)]
    pub is_sold_out: bool,
    #[serde(default)]
    pub colors: Vec<VariantOption>,
    #[serde(default)]
    pub sizes: Vec<VariantOption>,
    #[serde(default)]
    pub combinations: Vec<Combination>,
}

/// Status text for a product that can still be bought.
pub const ON_SALE_STATUS: &str = "판매중";
/// Status text for a sold-out product.
pub const SOLD_OUT_STATUS: &str = "품절";

impl Product {
    /// Returns `true` if any color or size chip is sold out.
    #[must_use]
    pub fn has_sold_out_options(&self) -> bool {
        self.colors
            .iter()
            .chain(self.sizes.iter())
            .any(|o| o.is_sold_out)
    }

    /// Cards offer the restock action when the product itself or any of its
    /// chips is sold out.
    #[must_use]
    pub fn offers_restock(&self) -> bool {
        self.is_sold_out || self.has_sold_out_options()
    }

    #[must_use]
    pub fn status(&self) -> &'static str {
        if self.is_sold_out {
            SOLD_OUT_STATUS
        } else {
            ON_SALE_STATUS
        }
    }

    #[must_use]
    pub fn has_options(&self) -> bool {
        !self.colors.is_empty() || !self.sizes.is_empty()
    }

    /// Returns the options of one chip row.
    #[must_use]
    pub fn options(&self, group: OptionGroup) -> &[VariantOption] {
        match group {
            OptionGroup::Color => &self.colors,
            OptionGroup::Size => &self.sizes,
        }
    }
}

/// A single color or size chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOption {
    pub name: String,
    #[serde(default)]
    pub is_sold_out: bool,
    pub group: OptionGroup,
}

/// Availability of one specific (color, size) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combination {
    pub color: String,
    pub size: String,
    #[serde(default)]
    pub is_sold_out: bool,
}
