//! Price parsing, discount calculation, and display formatting.
//!
//! Prices reach us either as JSON numbers (`89000`, `89000.0`) or as
//! decorated strings (`"89,000원"`, `"89,000KRW"`, `"쿠폰적용가 71,200"`).
//! Strings have every non-digit removed before parsing; numbers pass through.

use serde_json::Value;

/// Won suffix used by [`format_price`].
pub const CURRENCY_SUFFIX: &str = "원";

/// Resolved prices for one product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub final_price: Option<u64>,
    pub original_price: Option<u64>,
    pub discount_rate: Option<u8>,
}

impl PriceBreakdown {
    /// Pairs already-parsed prices and derives the discount between them.
    #[must_use]
    pub fn from_prices(final_price: Option<u64>, original_price: Option<u64>) -> Self {
        Self {
            final_price,
            original_price,
            discount_rate: discount_rate(final_price, original_price),
        }
    }
}

/// Parses a raw price into whole won.
///
/// Returns `None` (a malformed price is just an absent price) when a string
/// has no digits, the digits overflow `u64`, the value is negative or not a
/// scalar, or the result is zero.
#[must_use]
pub fn parse_price(raw: &Value) -> Option<u64> {
    let parsed = match raw {
        Value::String(s) => {
            let digits: String = s.chars().filter(char::is_ascii_digit).collect();
            if digits.is_empty() {
                None
            } else {
                digits.parse::<u64>().ok()
            }
        }
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(round_float_price)),
        _ => None,
    };

    let price = parsed.filter(|&p| p > 0);
    if price.is_none() {
        tracing::debug!(raw = %raw, "discarding malformed price");
    }
    price
}

// Rounding is bounded by the range check above the casts.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn round_float_price(f: f64) -> Option<u64> {
    if !f.is_finite() || f < 0.0 || f >= u64::MAX as f64 {
        return None;
    }
    Some(f.round() as u64)
}

/// Whole-number discount percentage, rounded half-up.
///
/// Only defined when both prices are known and `original > final`; never
/// negative and never derived from a single price.
#[must_use]
pub fn discount_rate(final_price: Option<u64>, original_price: Option<u64>) -> Option<u8> {
    let (final_price, original_price) = (final_price?, original_price?);
    if original_price <= final_price {
        return None;
    }

    // round(d / o * 100) == floor((200d + o) / 2o) for positive d, o.
    let diff = u128::from(original_price - final_price);
    let original = u128::from(original_price);
    let rate = (diff * 200 + original) / (original * 2);
    u8::try_from(rate).ok()
}

/// Resolves both raw prices and derives the discount between them.
#[must_use]
pub fn compute_prices(raw_final: Option<&Value>, raw_original: Option<&Value>) -> PriceBreakdown {
    PriceBreakdown::from_prices(
        raw_final.and_then(parse_price),
        raw_original.and_then(parse_price),
    )
}

/// Formats won with a `,` thousands separator, e.g. `89000` → `"89,000원"`.
#[must_use]
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + CURRENCY_SUFFIX.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push_str(CURRENCY_SUFFIX);
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    // -----------------------------------------------------------------------
    // parse_price
    // -----------------------------------------------------------------------

    #[test]
    fn parse_price_strips_won_decoration() {
        assert_eq!(parse_price(&json!("89,000원")), Some(89_000));
    }

    #[test]
    fn parse_price_strips_krw_suffix() {
        assert_eq!(parse_price(&json!("71,200KRW")), Some(71_200));
    }

    #[test]
    fn parse_price_strips_label_text() {
        assert_eq!(parse_price(&json!("쿠폰적용가 12,000")), Some(12_000));
    }

    #[test]
    fn parse_price_passes_integers_through() {
        assert_eq!(parse_price(&json!(39_900)), Some(39_900));
    }

    #[test]
    fn parse_price_rounds_floats() {
        assert_eq!(parse_price(&json!(39_900.0)), Some(39_900));
        assert_eq!(parse_price(&json!(99.6)), Some(100));
    }

    #[test]
    fn parse_price_absent_without_digits() {
        assert_eq!(parse_price(&json!("가격 문의")), None);
        assert_eq!(parse_price(&json!("")), None);
    }

    #[test]
    fn parse_price_absent_for_zero() {
        assert_eq!(parse_price(&json!("0원")), None);
        assert_eq!(parse_price(&json!(0)), None);
    }

    #[test]
    fn parse_price_absent_for_negative_and_non_scalars() {
        assert_eq!(parse_price(&json!(-5)), None);
        assert_eq!(parse_price(&json!(-5.5)), None);
        assert_eq!(parse_price(&json!(true)), None);
        assert_eq!(parse_price(&json!({"amount": 1000})), None);
    }

    #[test]
    fn parse_price_absent_on_overflow() {
        assert_eq!(parse_price(&json!("99999999999999999999999")), None);
    }

    // -----------------------------------------------------------------------
    // discount_rate / compute_prices
    // -----------------------------------------------------------------------

    #[test]
    fn discount_rate_rounds_to_whole_percent() {
        assert_eq!(discount_rate(Some(71_200), Some(89_000)), Some(20));
        // 33.33..% rounds down, 66.66..% rounds up.
        assert_eq!(discount_rate(Some(20_000), Some(30_000)), Some(33));
        assert_eq!(discount_rate(Some(10_000), Some(30_000)), Some(67));
    }

    #[test]
    fn discount_rate_rounds_half_up() {
        // (200 - 199) / 200 = 0.5%
        assert_eq!(discount_rate(Some(199), Some(200)), Some(1));
    }

    #[test]
    fn discount_rate_absent_when_original_not_greater() {
        assert_eq!(discount_rate(Some(10_000), Some(10_000)), None);
        assert_eq!(discount_rate(Some(12_000), Some(10_000)), None);
    }

    #[test]
    fn discount_rate_absent_with_single_price() {
        assert_eq!(discount_rate(Some(10_000), None), None);
        assert_eq!(discount_rate(None, Some(10_000)), None);
    }

    #[test]
    fn compute_prices_end_to_end_strings() {
        let breakdown = compute_prices(Some(&json!("71,200원")), Some(&json!("89,000원")));
        assert_eq!(
            breakdown,
            PriceBreakdown {
                final_price: Some(71_200),
                original_price: Some(89_000),
                discount_rate: Some(20),
            }
        );
    }

    #[test]
    fn compute_prices_mixed_number_and_string() {
        let breakdown = compute_prices(Some(&json!(45_000)), Some(&json!("50,000원")));
        assert_eq!(breakdown.discount_rate, Some(10));
    }

    #[test]
    fn compute_prices_malformed_original_yields_no_discount() {
        let breakdown = compute_prices(Some(&json!("45,000원")), Some(&json!("N/A")));
        assert_eq!(breakdown.final_price, Some(45_000));
        assert_eq!(breakdown.original_price, None);
        assert_eq!(breakdown.discount_rate, None);
    }

    #[test]
    fn from_prices_matches_compute_prices() {
        assert_eq!(
            PriceBreakdown::from_prices(Some(71_200), Some(89_000)),
            compute_prices(Some(&json!("71,200원")), Some(&json!(89_000)))
        );
        assert_eq!(
            PriceBreakdown::from_prices(Some(89_000), None),
            PriceBreakdown {
                final_price: Some(89_000),
                original_price: None,
                discount_rate: None,
            }
        );
    }

    // -----------------------------------------------------------------------
    // format_price
    // -----------------------------------------------------------------------

    #[test]
    fn format_price_inserts_thousands_separators() {
        assert_eq!(format_price(89_000), "89,000원");
        assert_eq!(format_price(1_234_567), "1,234,567원");
    }

    #[test]
    fn format_price_small_values_have_no_separator() {
        assert_eq!(format_price(7), "7원");
        assert_eq!(format_price(999), "999원");
    }
}
