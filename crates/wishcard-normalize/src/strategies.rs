//! The fixed per-field fallback chains.
//!
//! Order within every chain: JSON-LD structured data, then site global
//! state, then the embedded `__NEXT_DATA__` backup, then plain selector text,
//! then page meta tags and the document title. Price chains put the
//! selector results first because the crawler scripts already pick the
//! displayed price there; structured offers are often stale list prices.

use std::collections::HashMap;

use serde_json::Value;
use wishcard_core::{Combination, ON_SALE_STATUS, SOLD_OUT_STATUS};

use crate::combinations::parse_combinations;
use crate::options::{parse_raw_options, RawOption};
use crate::price::parse_price;
use crate::raw::{first_key, lookup, text, RawSourceRecord};
use crate::resolve::Strategy;
use crate::text::{clean_title, ensure_https};

// ---------------------------------------------------------------------------
// title
// ---------------------------------------------------------------------------

pub const TITLE_CHAIN: &[Strategy<String>] = &[
    Strategy {
        name: "structured_data.name",
        extract: structured_data_name,
    },
    Strategy {
        name: "site_state.name",
        extract: site_state_name,
    },
    Strategy {
        name: "embedded_json.name",
        extract: embedded_name,
    },
    Strategy {
        name: "selector.title",
        extract: selector_title,
    },
    Strategy {
        name: "meta.og_title",
        extract: meta_title,
    },
    Strategy {
        name: "page_title",
        extract: page_title,
    },
];

const NAME_KEYS: &[&str] = &["goodsNm", "goodsName", "name", "productName"];

fn title_text(value: Option<&Value>) -> Option<String> {
    clean_title(&text(value?)?)
}

fn structured_data_name(raw: &RawSourceRecord) -> Option<String> {
    title_text(raw.structured_data()?.get("name"))
}

fn site_state_name(raw: &RawSourceRecord) -> Option<String> {
    title_text(first_key(raw.site_state()?, NAME_KEYS))
}

fn embedded_name(raw: &RawSourceRecord) -> Option<String> {
    title_text(first_key(raw.embedded_product()?, NAME_KEYS))
}

fn selector_title(raw: &RawSourceRecord) -> Option<String> {
    title_text(raw.get("title"))
}

fn meta_title(raw: &RawSourceRecord) -> Option<String> {
    title_text(raw.meta("ogTitle"))
}

fn page_title(raw: &RawSourceRecord) -> Option<String> {
    title_text(raw.get("pageTitle"))
}

// ---------------------------------------------------------------------------
// image
// ---------------------------------------------------------------------------

pub const IMAGE_CHAIN: &[Strategy<String>] = &[
    Strategy {
        name: "structured_data.image",
        extract: structured_data_image,
    },
    Strategy {
        name: "site_state.image",
        extract: site_state_image,
    },
    Strategy {
        name: "embedded_json.image",
        extract: embedded_image,
    },
    Strategy {
        name: "selector.image",
        extract: selector_image,
    },
    Strategy {
        name: "meta.og_image",
        extract: meta_image,
    },
];

const IMAGE_KEYS: &[&str] = &["goodsImage", "goodsImg", "thumbnailImageUrl", "imageUrl"];

/// Reads an image reference: a URL string, the first element of an array,
/// or an `ImageObject` with `url`/`contentUrl`.
fn image_url(value: &Value) -> Option<String> {
    let url = match value {
        Value::String(_) => text(value),
        Value::Array(items) => items.iter().find_map(image_url),
        Value::Object(_) => first_key(value, &["url", "contentUrl", "src"]).and_then(text),
        _ => None,
    }?;
    Some(ensure_https(&url))
}

fn structured_data_image(raw: &RawSourceRecord) -> Option<String> {
    image_url(raw.structured_data()?.get("image")?)
}

fn site_state_image(raw: &RawSourceRecord) -> Option<String> {
    let state = raw.site_state()?;
    first_key(state, IMAGE_KEYS)
        .or_else(|| state.get("productImages"))
        .and_then(image_url)
}

fn embedded_image(raw: &RawSourceRecord) -> Option<String> {
    first_key(raw.embedded_product()?, IMAGE_KEYS).and_then(image_url)
}

fn selector_image(raw: &RawSourceRecord) -> Option<String> {
    image_url(raw.get("image")?)
}

fn meta_image(raw: &RawSourceRecord) -> Option<String> {
    image_url(raw.meta("ogImage")?)
}

// ---------------------------------------------------------------------------
// prices
// ---------------------------------------------------------------------------

pub const PRICE_CHAIN: &[Strategy<u64>] = &[
    Strategy {
        name: "selector.price",
        extract: selector_price,
    },
    Strategy {
        name: "selector.price_final",
        extract: selector_price_final,
    },
    Strategy {
        name: "structured_data.offers.price",
        extract: structured_data_offer_price,
    },
    Strategy {
        name: "site_state.price",
        extract: site_state_price,
    },
    Strategy {
        name: "embedded_json.price",
        extract: embedded_price,
    },
    Strategy {
        name: "meta.sale_price",
        extract: meta_sale_price,
    },
];

pub const COUPON_PRICE_CHAIN: &[Strategy<u64>] = &[
    Strategy {
        name: "selector.coupon_price",
        extract: selector_coupon_price,
    },
    Strategy {
        name: "site_state.coupon_price",
        extract: site_state_coupon_price,
    },
];

pub const ORIGINAL_PRICE_CHAIN: &[Strategy<u64>] = &[
    Strategy {
        name: "selector.price_original",
        extract: selector_price_original,
    },
    Strategy {
        name: "site_state.consumer_price",
        extract: site_state_original_price,
    },
    Strategy {
        name: "embedded_json.consumer_price",
        extract: embedded_original_price,
    },
];

const SALE_PRICE_KEYS: &[&str] = &["goodsPrice", "salePrice", "discountedPrice", "price"];
const LIST_PRICE_KEYS: &[&str] = &["consumerPrice", "normalPrice", "originalPrice"];

/// First key whose value parses as a price; malformed values fall through
/// to the next key rather than ending the lookup.
fn first_price(node: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter()
        .find_map(|key| node.get(*key).and_then(parse_price))
}

fn selector_price(raw: &RawSourceRecord) -> Option<u64> {
    parse_price(raw.get("price")?)
}

fn selector_price_final(raw: &RawSourceRecord) -> Option<u64> {
    parse_price(raw.get("price_final")?)
}

fn structured_data_offer_price(raw: &RawSourceRecord) -> Option<u64> {
    let offers = raw.structured_data()?.get("offers")?;
    let offer = match offers {
        Value::Array(items) => items.first()?,
        other => other,
    };
    first_price(offer, &["price", "lowPrice"])
}

fn site_state_price(raw: &RawSourceRecord) -> Option<u64> {
    first_price(raw.site_state()?, SALE_PRICE_KEYS)
}

fn embedded_price(raw: &RawSourceRecord) -> Option<u64> {
    first_price(raw.embedded_product()?, SALE_PRICE_KEYS)
}

fn meta_sale_price(raw: &RawSourceRecord) -> Option<u64> {
    parse_price(raw.meta("salePrice")?)
}

fn selector_coupon_price(raw: &RawSourceRecord) -> Option<u64> {
    parse_price(raw.get("couponPrice")?)
}

fn site_state_coupon_price(raw: &RawSourceRecord) -> Option<u64> {
    first_price(raw.site_state()?, &["couponPrice", "couponDiscountedPrice"])
}

fn selector_price_original(raw: &RawSourceRecord) -> Option<u64> {
    parse_price(raw.get("price_original")?)
}

fn site_state_original_price(raw: &RawSourceRecord) -> Option<u64> {
    first_price(raw.site_state()?, LIST_PRICE_KEYS)
}

fn embedded_original_price(raw: &RawSourceRecord) -> Option<u64> {
    first_price(raw.embedded_product()?, LIST_PRICE_KEYS)
}

// ---------------------------------------------------------------------------
// options
// ---------------------------------------------------------------------------

pub const SIZE_CHAIN: &[Strategy<Vec<RawOption>>] = &[
    Strategy {
        name: "selector.sizes",
        extract: selector_sizes,
    },
    Strategy {
        name: "site_state.option_list",
        extract: site_state_sizes,
    },
    Strategy {
        name: "embedded_json.option_list",
        extract: embedded_sizes,
    },
    Strategy {
        name: "site_state.option_combos.size",
        extract: combo_sizes,
    },
];

pub const COLOR_CHAIN: &[Strategy<Vec<RawOption>>] = &[
    Strategy {
        name: "selector.colors",
        extract: selector_colors,
    },
    Strategy {
        name: "site_state.colors",
        extract: site_state_colors,
    },
    Strategy {
        name: "site_state.option_combos.color",
        extract: combo_colors,
    },
];

const SIZE_LIST_PATHS: &[&[&str]] = &[
    &["option", "list"],
    &["goodsOption", "optionValues"],
    &["option", "simpleOptions"],
    &["sizes"],
];

const COLOR_LIST_PATHS: &[&[&str]] = &[&["colors"], &["option", "colors"]];

/// First path that yields at least one option.
fn first_option_list(node: &Value, paths: &[&[&str]]) -> Option<Vec<RawOption>> {
    paths.iter().find_map(|path| {
        let options = parse_raw_options(lookup(node, path)?);
        (!options.is_empty()).then_some(options)
    })
}

fn selector_sizes(raw: &RawSourceRecord) -> Option<Vec<RawOption>> {
    Some(parse_raw_options(raw.get("sizes")?))
}

fn site_state_sizes(raw: &RawSourceRecord) -> Option<Vec<RawOption>> {
    first_option_list(raw.site_state()?, SIZE_LIST_PATHS)
}

fn embedded_sizes(raw: &RawSourceRecord) -> Option<Vec<RawOption>> {
    first_option_list(raw.embedded_product()?, SIZE_LIST_PATHS)
}

fn selector_colors(raw: &RawSourceRecord) -> Option<Vec<RawOption>> {
    Some(parse_raw_options(raw.get("colors")?))
}

fn site_state_colors(raw: &RawSourceRecord) -> Option<Vec<RawOption>> {
    first_option_list(raw.site_state()?, COLOR_LIST_PATHS)
}

fn combo_sizes(raw: &RawSourceRecord) -> Option<Vec<RawOption>> {
    combo_axis(&site_state_combos(raw)?, |c| &c.size)
}

fn combo_colors(raw: &RawSourceRecord) -> Option<Vec<RawOption>> {
    combo_axis(&site_state_combos(raw)?, |c| &c.color)
}

/// Projects option combos onto one axis. An axis value is sold out only when
/// every combo carrying it is sold out.
fn combo_axis(
    combos: &[Combination],
    axis: impl Fn(&Combination) -> &String,
) -> Option<Vec<RawOption>> {
    let mut order: Vec<&String> = Vec::new();
    let mut all_sold_out: HashMap<String, bool> = HashMap::new();

    for combo in combos {
        let name = axis(combo);
        let key = name.trim().to_lowercase();
        match all_sold_out.get_mut(&key) {
            Some(sold_out) => *sold_out &= combo.is_sold_out,
            None => {
                all_sold_out.insert(key, combo.is_sold_out);
                order.push(name);
            }
        }
    }

    let options: Vec<RawOption> = order
        .into_iter()
        .map(|name| {
            let sold_out = all_sold_out
                .get(&name.trim().to_lowercase())
                .copied()
                .unwrap_or(false);
            RawOption::new(name.clone(), sold_out)
        })
        .collect();
    (!options.is_empty()).then_some(options)
}

// ---------------------------------------------------------------------------
// combinations
// ---------------------------------------------------------------------------

pub const COMBINATION_CHAIN: &[Strategy<Vec<Combination>>] = &[
    Strategy {
        name: "selector.combinations",
        extract: selector_combinations,
    },
    Strategy {
        name: "site_state.option_combos",
        extract: site_state_combos,
    },
];

fn selector_combinations(raw: &RawSourceRecord) -> Option<Vec<Combination>> {
    Some(parse_combinations(raw.get("combinations")?))
}

fn site_state_combos(raw: &RawSourceRecord) -> Option<Vec<Combination>> {
    let combos = lookup(raw.site_state()?, &["option", "optionCombos"])?;
    Some(parse_combinations(combos))
}

// ---------------------------------------------------------------------------
// product-level availability
// ---------------------------------------------------------------------------

pub const SOLD_OUT_CHAIN: &[Strategy<bool>] = &[
    Strategy {
        name: "site_state.is_sold_out",
        extract: site_state_sold_out,
    },
    Strategy {
        name: "embedded_json.is_sold_out",
        extract: embedded_sold_out,
    },
    Strategy {
        name: "selector.sold_out",
        extract: selector_sold_out,
    },
];

/// Reads an explicit sold-out flag. Unlike option stock fields, a missing
/// flag is absent rather than "available" so the chain can fall through.
fn sold_out_flag(node: &Value) -> Option<bool> {
    if let Some(flag) = first_key(node, &["isSoldOut", "soldOut"]).and_then(Value::as_bool) {
        return Some(flag);
    }
    let yn = node.get("soldOutYn")?.as_str()?.trim();
    if yn.eq_ignore_ascii_case("y") {
        Some(true)
    } else if yn.eq_ignore_ascii_case("n") {
        Some(false)
    } else {
        None
    }
}

fn site_state_sold_out(raw: &RawSourceRecord) -> Option<bool> {
    sold_out_flag(raw.site_state()?)
}

fn embedded_sold_out(raw: &RawSourceRecord) -> Option<bool> {
    sold_out_flag(raw.embedded_product()?)
}

/// The adapter's own page check: a `soldOut` flag, or the status text shown
/// on the buy button.
fn selector_sold_out(raw: &RawSourceRecord) -> Option<bool> {
    if let Some(flag) = raw.get("soldOut").and_then(Value::as_bool) {
        return Some(flag);
    }
    let status = text(raw.get("status")?)?;
    if status.contains(SOLD_OUT_STATUS) {
        Some(true)
    } else if status.contains(ON_SALE_STATUS) {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "strategies_test.rs"]
mod tests;
