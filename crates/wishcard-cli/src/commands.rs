//! Command handlers. Each one loads the saved list, applies a single
//! operation and writes the list back when it changed.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use wishcard_board::{load_products, save_products, Action, Board, BoardError, Effect};
use wishcard_core::{AppConfig, OptionGroup, Product, SiteTable};
use wishcard_normalize::{AssemblerConfig, ProductAssembler};

/// Everything a handler needs, built once from the environment.
pub(crate) struct Runtime {
    config: AppConfig,
    sites: SiteTable,
    assembler: ProductAssembler,
}

impl Runtime {
    /// # Errors
    ///
    /// Returns an error if a configured site table cannot be loaded.
    pub(crate) fn new(config: AppConfig) -> anyhow::Result<Self> {
        let sites = match &config.sites_path {
            Some(path) => wishcard_core::load_sites(path)
                .with_context(|| format!("loading site table from {}", path.display()))?,
            None => SiteTable::default(),
        };
        let assembler =
            ProductAssembler::new(AssemblerConfig::from_app_config(&config, sites.clone()));
        tracing::debug!(
            env = %config.env,
            list_path = %config.list_path.display(),
            sites = sites.sites.len(),
            "runtime ready"
        );
        Ok(Self {
            config,
            sites,
            assembler,
        })
    }

    fn load_board(&self) -> anyhow::Result<Board> {
        Ok(Board::from_products(load_products(&self.config.list_path)?))
    }

    fn save_board(&self, board: &Board) -> anyhow::Result<()> {
        save_products(&self.config.list_path, &board.products())?;
        Ok(())
    }
}

fn read_adapter_output(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading adapter output from {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading adapter output from stdin")?;
            Ok(buf)
        }
    }
}

pub(crate) fn run_assemble(
    runtime: &Runtime,
    url: &str,
    input: Option<&Path>,
) -> anyhow::Result<()> {
    let json = read_adapter_output(input)?;
    let product = runtime.assembler.assemble_json(url, &json)?;
    println!("{}", serde_json::to_string_pretty(&product)?);
    Ok(())
}

pub(crate) fn run_add(runtime: &Runtime, url: &str, input: Option<&Path>) -> anyhow::Result<()> {
    let mut board = runtime.load_board()?;

    // Checked before the adapter output is read.
    if let Err(BoardError::DuplicateSubmission { source_url }) = board.ensure_not_saved(url) {
        println!("already saved: {source_url}");
        return Ok(());
    }

    let json = read_adapter_output(input)?;
    let product = runtime.assembler.assemble_json(url, &json)?;
    let line = list_line(&runtime.sites, &product);
    board.add(product)?;
    runtime.save_board(&board)?;

    println!("added: {line}");
    Ok(())
}

pub(crate) fn run_list(runtime: &Runtime) -> anyhow::Result<()> {
    let board = runtime.load_board()?;
    if board.is_empty() {
        println!("no saved products; run `add` first");
        return Ok(());
    }

    println!("{:<10}{:<12}{:<7}TITLE", "SITE", "PRICE", "SALE");
    for card in board.cards() {
        println!("{}", list_line(&runtime.sites, card.product()));
    }
    Ok(())
}

pub(crate) fn run_delete(runtime: &Runtime, url: &str) -> anyhow::Result<()> {
    let mut board = runtime.load_board()?;
    let effect = board.dispatch(Action::Delete {
        source_url: url.to_string(),
    })?;
    runtime.save_board(&board)?;

    if let Effect::Removed(product) = effect {
        println!("deleted: {}", product.title);
    }
    Ok(())
}

pub(crate) fn run_clear(runtime: &Runtime) -> anyhow::Result<()> {
    let mut board = runtime.load_board()?;
    let effect = board.dispatch(Action::ClearAll)?;
    runtime.save_board(&board)?;

    if let Effect::Cleared(count) = effect {
        println!("cleared {count} saved product(s)");
    }
    Ok(())
}

pub(crate) fn run_restock(runtime: &Runtime, url: &str) -> anyhow::Result<()> {
    let mut board = runtime.load_board()?;
    let effect = board.dispatch(Action::Restock {
        source_url: url.to_string(),
    })?;

    if let Effect::OpenUrl(target) = effect {
        println!("open {target} to request a restock alert");
    }
    Ok(())
}

pub(crate) fn run_select(
    runtime: &Runtime,
    url: &str,
    colors: &[String],
    sizes: &[String],
) -> anyhow::Result<()> {
    let mut board = runtime.load_board()?;

    let clicks = colors
        .iter()
        .map(|c| (OptionGroup::Color, c))
        .chain(sizes.iter().map(|s| (OptionGroup::Size, s)));

    let mut transitions = Vec::new();
    for (group, name) in clicks {
        let effect = board.dispatch(Action::SelectOption {
            source_url: url.to_string(),
            group,
            name: name.clone(),
        })?;
        if let Effect::Selection(transition) = effect {
            transitions.push(serde_json::json!({
                "group": group,
                "name": name,
                "transition": transition,
            }));
        }
    }

    let card = board
        .card(url)
        .ok_or_else(|| anyhow::anyhow!("product '{url}' not found"))?;
    let selector = card.selector();
    let view = serde_json::json!({
        "sourceUrl": card.product().source_url,
        "clicks": transitions,
        "state": selector.state(),
        "colors": selector.chips(OptionGroup::Color),
        "sizes": selector.chips(OptionGroup::Size),
    });
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

/// One row of `list`: badge, price, discount and title.
pub(crate) fn list_line(sites: &SiteTable, product: &Product) -> String {
    let badge = &sites.by_key(&product.site).name;
    let price = product
        .coupon_price_formatted
        .as_deref()
        .or(product.price_formatted.as_deref())
        .unwrap_or("\u{2014}");
    let sale = product
        .discount_rate
        .map_or_else(|| "\u{2014}".to_string(), |rate| format!("{rate}%"));
    format!(
        "{badge:<10}{price:<12}{sale:<7}{:<5}{}",
        product.status(),
        product.title
    )
}
