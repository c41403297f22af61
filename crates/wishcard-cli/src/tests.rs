use std::path::Path;

use wishcard_core::{Product, SiteTable};

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["wishcard-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_assemble_with_input_file() {
    let cli = Cli::try_parse_from([
        "wishcard-cli",
        "assemble",
        "--url",
        "https://www.musinsa.com/products/1",
        "--input",
        "page.json",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Assemble { ref url, input: Some(ref input) })
            if url == "https://www.musinsa.com/products/1" && input == Path::new("page.json")
    ));
}

#[test]
fn parses_add_reading_stdin() {
    let cli = Cli::try_parse_from(["wishcard-cli", "add", "--url", "https://a.example/p"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Add { input: None, .. })));
}

#[test]
fn add_requires_url() {
    assert!(Cli::try_parse_from(["wishcard-cli", "add"]).is_err());
}

#[test]
fn parses_list_and_clear() {
    let cli = Cli::try_parse_from(["wishcard-cli", "list"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::List)));

    let cli = Cli::try_parse_from(["wishcard-cli", "clear"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Clear)));
}

#[test]
fn parses_delete_and_restock() {
    let cli = Cli::try_parse_from(["wishcard-cli", "delete", "--url", "u1"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Delete { ref url }) if url == "u1"));

    let cli = Cli::try_parse_from(["wishcard-cli", "restock", "--url", "u2"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Restock { ref url }) if url == "u2"));
}

#[test]
fn parses_select_with_repeated_chips() {
    let cli = Cli::try_parse_from([
        "wishcard-cli",
        "select",
        "--url",
        "u1",
        "--color",
        "red",
        "--size",
        "M",
        "--color",
        "blue",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Select { url, colors, sizes }) => {
            assert_eq!(url, "u1");
            assert_eq!(colors, vec!["red".to_string(), "blue".to_string()]);
            assert_eq!(sizes, vec!["M".to_string()]);
        }
        other => panic!("expected select command, got {other:?}"),
    }
}

#[test]
fn parses_select_without_clicks() {
    let cli = Cli::try_parse_from(["wishcard-cli", "select", "--url", "u1"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Select { ref colors, ref sizes, .. }) if colors.is_empty() && sizes.is_empty()
    ));
}

fn make_product(site: &str, discount_rate: Option<u8>, coupon: Option<&str>) -> Product {
    serde_json::from_value(serde_json::json!({
        "title": "울 코트",
        "sourceUrl": "https://www.musinsa.com/products/1",
        "site": site,
        "priceFormatted": "89,000원",
        "couponPriceFormatted": coupon,
        "discountRate": discount_rate
    }))
    .expect("valid product fixture")
}

#[test]
fn list_line_shows_badge_price_and_discount() {
    let line = commands::list_line(
        &SiteTable::default(),
        &make_product("musinsa", Some(20), Some("71,200원")),
    );
    assert!(line.starts_with("MUSINSA"));
    assert!(line.contains("71,200원"));
    assert!(line.contains("20%"));
    assert!(line.ends_with("울 코트"));
}

#[test]
fn list_line_falls_back_for_unknown_site_and_missing_discount() {
    let line = commands::list_line(&SiteTable::default(), &make_product("", None, None));
    assert!(line.starts_with("SHOP"));
    assert!(line.contains("89,000원"));
    assert!(line.contains('\u{2014}'));
}

#[test]
fn list_line_shows_sold_out_status() {
    let mut product = make_product("musinsa", None, None);
    assert!(commands::list_line(&SiteTable::default(), &product).contains("판매중"));

    product.is_sold_out = true;
    let line = commands::list_line(&SiteTable::default(), &product);
    assert!(line.contains("품절"));
    assert!(line.ends_with("울 코트"));
}
