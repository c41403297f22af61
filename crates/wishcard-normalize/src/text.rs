//! Text cleanup shared by the field resolver and option parsing.

use std::sync::LazyLock;

use regex::Regex;

/// Recommendation banners that leak into title selectors on Musinsa and Naver
/// pages when the real heading has not rendered yet.
const TITLE_BANNERS: &[&str] = &["이런 상품 어때요?", "함께 보면 좋은 상품", "추천 상품"];

/// A leading `[store name]` prefix, e.g. `"[무신사 스탠다드] 울 코트"`.
static STORE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[[^\]]*\]\s*").expect("valid regex"));

/// A parenthesized sold-out marker in option text, e.g. `"M (품절)"`.
static SOLD_OUT_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*[\(\[]\s*(품절|sold\s*out)\s*[\)\]]\s*").expect("valid regex")
});

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Cleans a candidate title. Returns `None` when nothing usable remains.
#[must_use]
pub fn clean_title(raw: &str) -> Option<String> {
    let mut title = raw.to_string();
    for banner in TITLE_BANNERS {
        title = title.replace(banner, "");
    }
    let title = STORE_PREFIX_RE.replace(&title, "");
    let title = WHITESPACE_RE.replace_all(title.trim(), " ");
    (!title.is_empty()).then(|| title.into_owned())
}

/// Upgrades protocol-relative URLs (`//image.msscdn.net/...`) to `https:`.
#[must_use]
pub fn ensure_https(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

/// Splits option text into its name and whether it carries a sold-out mark.
///
/// `"M (품절)"` → `("M", true)`; `"품절 L"` → `("품절 L", true)` (no
/// parenthesized marker to strip).
#[must_use]
pub fn split_sold_out_marker(raw: &str) -> (String, bool) {
    let lower = raw.to_lowercase();
    let marked = raw.contains("품절") || lower.contains("sold out") || lower.contains("soldout");
    let name = SOLD_OUT_MARKER_RE.replace_all(raw, " ");
    (WHITESPACE_RE.replace_all(name.trim(), " ").into_owned(), marked)
}

/// `true` for dropdown placeholders such as `"옵션 선택"` or `"사이즈를 선택하세요"`.
#[must_use]
pub fn is_placeholder_option(raw: &str) -> bool {
    raw.contains("선택")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_title_strips_store_prefix() {
        assert_eq!(
            clean_title("[무신사 스탠다드] 캐시미어 블렌드 코트").as_deref(),
            Some("캐시미어 블렌드 코트")
        );
    }

    #[test]
    fn clean_title_removes_banners_and_newlines() {
        assert_eq!(
            clean_title("이런 상품 어때요?\nWool\n Coat ").as_deref(),
            Some("Wool Coat")
        );
    }

    #[test]
    fn clean_title_banner_only_is_unusable() {
        assert_eq!(clean_title("  추천 상품 "), None);
        assert_eq!(clean_title(""), None);
    }

    #[test]
    fn clean_title_keeps_inner_brackets() {
        assert_eq!(
            clean_title("Coat [Limited]").as_deref(),
            Some("Coat [Limited]")
        );
    }

    #[test]
    fn ensure_https_upgrades_protocol_relative() {
        assert_eq!(
            ensure_https("//image.msscdn.net/a.jpg"),
            "https://image.msscdn.net/a.jpg"
        );
        assert_eq!(ensure_https("http://x/a.jpg"), "http://x/a.jpg");
    }

    #[test]
    fn split_sold_out_marker_strips_parenthesized_mark() {
        assert_eq!(split_sold_out_marker("M (품절)"), ("M".to_string(), true));
        assert_eq!(
            split_sold_out_marker("Black [Sold Out]"),
            ("Black".to_string(), true)
        );
    }

    #[test]
    fn split_sold_out_marker_leaves_plain_names() {
        assert_eq!(split_sold_out_marker(" L "), ("L".to_string(), false));
    }

    #[test]
    fn is_placeholder_option_detects_select_prompt() {
        assert!(is_placeholder_option("사이즈 선택"));
        assert!(!is_placeholder_option("FREE"));
    }
}
