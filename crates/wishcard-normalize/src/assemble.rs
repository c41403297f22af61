//! Composition of the field resolver, price calculator, option normalizer and
//! combination parsing into one [`Product`].

use wishcard_core::{AppConfig, OptionGroup, Product, SiteTable};

use crate::error::NormalizeError;
use crate::options::normalize_options;
use crate::price::{format_price, PriceBreakdown};
use crate::raw::{AdapterResponse, RawSourceRecord};
use crate::resolve::resolve_field;
use crate::strategies::{
    COLOR_CHAIN, COMBINATION_CHAIN, COUPON_PRICE_CHAIN, IMAGE_CHAIN, ORIGINAL_PRICE_CHAIN,
    PRICE_CHAIN, SIZE_CHAIN, SOLD_OUT_CHAIN, TITLE_CHAIN,
};

pub const DEFAULT_FALLBACK_TITLE: &str = "Untitled product";

/// Immutable inputs the assembler needs besides the raw record.
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    pub sites: SiteTable,
    /// Used when no source yields a usable title. Must be non-blank.
    pub fallback_title: String,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            sites: SiteTable::default(),
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
        }
    }
}

impl AssemblerConfig {
    /// Builds the assembler config from app config and an already-loaded
    /// site table.
    #[must_use]
    pub fn from_app_config(config: &AppConfig, sites: SiteTable) -> Self {
        Self {
            sites,
            fallback_title: config.fallback_title.clone(),
        }
    }
}

/// Turns adapter output into canonical products. Stateless between calls.
#[derive(Debug, Clone, Default)]
pub struct ProductAssembler {
    config: AssemblerConfig,
}

impl ProductAssembler {
    #[must_use]
    pub fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Assembles a product for `source_url` from one adapter response.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::AdapterFailure`] when the adapter reported a
    /// hard failure. Missing or malformed fields are never errors.
    pub fn assemble(
        &self,
        source_url: &str,
        response: AdapterResponse,
    ) -> Result<Product, NormalizeError> {
        match response {
            AdapterResponse::Record(raw) => Ok(self.assemble_record(source_url, &raw)),
            AdapterResponse::Failure { error, detail } => {
                tracing::warn!(source_url, error = %error, detail = ?detail, "source adapter failed");
                Err(NormalizeError::AdapterFailure { error, detail })
            }
        }
    }

    /// Parses adapter JSON and assembles it.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Deserialize`] or
    /// [`NormalizeError::UnexpectedShape`] for unusable JSON, and
    /// [`NormalizeError::AdapterFailure`] for a failure descriptor.
    pub fn assemble_json(&self, source_url: &str, json: &str) -> Result<Product, NormalizeError> {
        self.assemble(source_url, AdapterResponse::from_json_str(json)?)
    }

    /// Assembles a product from a raw record. Infallible: every field has a
    /// defined absent state and the title has a fallback.
    #[must_use]
    pub fn assemble_record(&self, source_url: &str, raw: &RawSourceRecord) -> Product {
        let title = resolve_field("title", raw, TITLE_CHAIN)
            .unwrap_or_else(|| self.config.fallback_title.clone());
        let image = resolve_field("image", raw, IMAGE_CHAIN);

        let price = resolve_field("price", raw, PRICE_CHAIN);
        let coupon_price = resolve_field("coupon_price", raw, COUPON_PRICE_CHAIN);
        let original_price = resolve_field("original_price", raw, ORIGINAL_PRICE_CHAIN);

        // With a coupon the coupon price is what the shopper pays and the
        // selling price is the reference; otherwise compare against the list
        // price.
        let breakdown = match coupon_price {
            Some(coupon) => PriceBreakdown::from_prices(Some(coupon), price),
            None => PriceBreakdown::from_prices(price, original_price),
        };
        let is_sold_out = resolve_field("is_sold_out", raw, SOLD_OUT_CHAIN).unwrap_or(false);

        let colors = resolve_field("colors", raw, COLOR_CHAIN)
            .map(|raw_opts| normalize_options(&raw_opts, OptionGroup::Color))
            .unwrap_or_default();
        let sizes = resolve_field("sizes", raw, SIZE_CHAIN)
            .map(|raw_opts| normalize_options(&raw_opts, OptionGroup::Size))
            .unwrap_or_default();
        let combinations = resolve_field("combinations", raw, COMBINATION_CHAIN).unwrap_or_default();

        let site = self.config.sites.resolve(source_url).key.clone();

        tracing::info!(
            source_url,
            site = %site,
            title = %title,
            price = ?price,
            coupon_price = ?coupon_price,
            discount_rate = ?breakdown.discount_rate,
            is_sold_out,
            colors = colors.len(),
            sizes = sizes.len(),
            combinations = combinations.len(),
            "assembled product"
        );

        Product {
            title,
            source_url: source_url.to_string(),
            site,
            image,
            price,
            price_formatted: price.map(format_price),
            coupon_price,
            coupon_price_formatted: coupon_price.map(format_price),
            original_price,
            original_price_formatted: original_price.map(format_price),
            discount_rate: breakdown.discount_rate,
            is_sold_out,
            colors,
            sizes,
            combinations,
        }
    }
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod tests;
