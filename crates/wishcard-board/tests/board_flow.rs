//! Submit, click, persist and reload a board built from adapter output.

use std::path::PathBuf;

use wishcard_board::{
    load_products, save_products, Action, Board, BoardError, Effect, Transition,
};
use wishcard_core::OptionGroup;
use wishcard_normalize::ProductAssembler;

const COAT_URL: &str = "https://www.musinsa.com/products/3456789";
const TEE_URL: &str = "https://smartstore.naver.com/shop/products/42";

const COAT_JSON: &str = r#"{
    "title": "울 코트",
    "price": "89,000원",
    "couponPrice": "71,200원",
    "colors": ["red", "blue"],
    "sizes": ["S", "M", "L (품절)"],
    "combinations": [
        {"color": "red", "size": "S", "isSoldOut": true},
        {"color": "red", "size": "M", "isSoldOut": false},
        {"color": "blue", "size": "L", "isSoldOut": false}
    ]
}"#;

const TEE_JSON: &str = r#"{"siteState": {"name": "반팔 티셔츠", "salePrice": 19900}}"#;

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("wishcard-board-flow-{name}-{}", std::process::id()))
        .join("saved-products.json")
}

fn submit(board: &mut Board, assembler: &ProductAssembler, url: &str, json: &str) {
    board.ensure_not_saved(url).expect("url not yet saved");
    let product = assembler.assemble_json(url, json).expect("adapter output assembles");
    board.add(product).expect("url not yet saved");
}

fn select(url: &str, group: OptionGroup, name: &str) -> Action {
    Action::SelectOption {
        source_url: url.to_string(),
        group,
        name: name.to_string(),
    }
}

#[test]
fn submit_select_and_narrow_sizes() {
    let assembler = ProductAssembler::default();
    let mut board = Board::new();
    submit(&mut board, &assembler, COAT_URL, COAT_JSON);

    let card = board.card(COAT_URL).expect("card added");
    assert_eq!(card.product().discount_rate, Some(20));
    assert!(card.offers_restock());

    assert_eq!(
        board.dispatch(select(COAT_URL, OptionGroup::Size, "S")).expect("known url"),
        Effect::Selection(Transition::Selected)
    );
    assert_eq!(
        board.dispatch(select(COAT_URL, OptionGroup::Color, "red")).expect("known url"),
        Effect::Selection(Transition::Selected)
    );

    let card = board.card(COAT_URL).expect("card present");
    let sizes: Vec<(String, bool, bool)> = card
        .selector()
        .chips(OptionGroup::Size)
        .into_iter()
        .map(|c| (c.name, c.is_sold_out, c.is_selected))
        .collect();
    assert_eq!(
        sizes,
        vec![
            ("S".to_string(), true, false),
            ("M".to_string(), false, false),
            ("L".to_string(), true, false),
        ]
    );

    // blue lifts the baseline sold-out flag on L.
    board
        .dispatch(select(COAT_URL, OptionGroup::Color, "blue"))
        .expect("known url");
    assert_eq!(
        board.dispatch(select(COAT_URL, OptionGroup::Size, "L")).expect("known url"),
        Effect::Selection(Transition::Selected)
    );
}

#[test]
fn duplicate_submission_is_caught_before_assembly() {
    let assembler = ProductAssembler::default();
    let mut board = Board::new();
    submit(&mut board, &assembler, COAT_URL, COAT_JSON);

    let err = board
        .ensure_not_saved(COAT_URL)
        .expect_err("second submission is a duplicate");
    assert!(matches!(err, BoardError::DuplicateSubmission { .. }));
    assert_eq!(err.to_string(), format!("product already saved: {COAT_URL}"));
}

#[test]
fn board_survives_save_and_reload() {
    let path = scratch_path("reload");
    let assembler = ProductAssembler::default();
    let mut board = Board::new();
    submit(&mut board, &assembler, COAT_URL, COAT_JSON);
    submit(&mut board, &assembler, TEE_URL, TEE_JSON);
    board
        .dispatch(select(COAT_URL, OptionGroup::Color, "red"))
        .expect("known url");

    save_products(&path, &board.products()).expect("save succeeds");
    let reloaded = Board::from_products(load_products(&path).expect("load succeeds"));

    let urls: Vec<String> = reloaded
        .products()
        .into_iter()
        .map(|p| p.source_url)
        .collect();
    assert_eq!(urls, vec![TEE_URL.to_string(), COAT_URL.to_string()]);
    assert_eq!(reloaded.products(), board.products());

    // Selection is ephemeral.
    let card = reloaded.card(COAT_URL).expect("card reloaded");
    assert_eq!(card.selector().state().selected_color, None);

    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[test]
fn delete_and_clear_update_persisted_list() {
    let path = scratch_path("delete");
    let assembler = ProductAssembler::default();
    let mut board = Board::new();
    submit(&mut board, &assembler, COAT_URL, COAT_JSON);
    submit(&mut board, &assembler, TEE_URL, TEE_JSON);

    let effect = board
        .dispatch(Action::Delete {
            source_url: TEE_URL.to_string(),
        })
        .expect("known url");
    assert!(effect.mutates_list());
    save_products(&path, &board.products()).expect("save succeeds");
    assert_eq!(load_products(&path).expect("load succeeds").len(), 1);

    let effect = board.dispatch(Action::ClearAll).expect("clear never fails");
    assert_eq!(effect, Effect::Cleared(1));
    save_products(&path, &board.products()).expect("save succeeds");
    assert!(load_products(&path).expect("load succeeds").is_empty());

    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}
