mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::Runtime;

#[derive(Debug, Parser)]
#[command(name = "wishcard-cli")]
#[command(about = "Normalize scraped product pages and manage the saved wishlist")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Assemble adapter output into a product and print it as JSON
    Assemble {
        /// Product page URL the adapter was run against
        #[arg(long)]
        url: String,
        /// File with the adapter JSON (defaults to stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Assemble adapter output and save it to the list
    Add {
        /// Product page URL the adapter was run against
        #[arg(long)]
        url: String,
        /// File with the adapter JSON (defaults to stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Show saved products, newest first
    List,
    /// Remove one saved product
    Delete {
        #[arg(long)]
        url: String,
    },
    /// Remove every saved product
    Clear,
    /// Print the page to visit for a restock alert
    Restock {
        #[arg(long)]
        url: String,
    },
    /// Replay chip clicks on a saved product and print the chip states
    Select {
        #[arg(long)]
        url: String,
        /// Color chip to click; repeatable, applied in order
        #[arg(long = "color")]
        colors: Vec<String>,
        /// Size chip to click after the colors; repeatable
        #[arg(long = "size")]
        sizes: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = wishcard_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("wishcard-cli ready; run with --help for commands");
        return Ok(());
    };

    let runtime = Runtime::new(config)?;
    match command {
        Commands::Assemble { url, input } => commands::run_assemble(&runtime, &url, input.as_deref()),
        Commands::Add { url, input } => commands::run_add(&runtime, &url, input.as_deref()),
        Commands::List => commands::run_list(&runtime),
        Commands::Delete { url } => commands::run_delete(&runtime, &url),
        Commands::Clear => commands::run_clear(&runtime),
        Commands::Restock { url } => commands::run_restock(&runtime, &url),
        Commands::Select { url, colors, sizes } => {
            commands::run_select(&runtime, &url, &colors, &sizes)
        }
    }
}

#[cfg(test)]
mod tests;
