//! digiglass entry point.
//!
//! Looks up vendor product categories by keyword or by fuzzy category name
//! and prints a lettered shortlist with search links.
//! Logging goes to stderr so stdout carries only the shortlist.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use digiglass_client::{Catalog, FetchClient, FetchConfig, rank};
use digiglass_core::{AppConfig, CacheDb};

mod output;

/// Find vendor product categories for a part.
#[derive(Debug, Parser)]
#[command(name = "digiglass", version, about)]
#[command(group = clap::ArgGroup::new("mode").required(true).multiple(true).args(["keywords", "category", "clear_cache"]))]
struct Args {
    /// Keywords to search the category index for.
    keywords: Vec<String>,

    /// Fuzzy-match this text against every category name.
    #[arg(short, long)]
    category: Option<String>,

    /// Number of categories to show (default from config).
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u8).range(1..=26))]
    limit: Option<u8>,

    /// Drop every cached listing and exit.
    #[arg(long)]
    clear_cache: bool,
}

impl Args {
    fn keywords(&self) -> Option<String> {
        let joined = self.keywords.join(" ");
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = AppConfig::load()?;

    if let Some(dir) = config.db_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating cache directory {}", dir.display()))?;
    }

    tracing::debug!(db_path = %config.db_path.display(), "opening cache");
    let cache = CacheDb::open(&config.db_path).await?;
    let fetcher = FetchClient::new(FetchConfig::from(&config))?;
    let catalog = Catalog::from_config(fetcher, cache, &config);

    if args.clear_cache {
        let removed = catalog.clear_cache().await?;
        tracing::info!(removed, "cache cleared");
        println!("Cache cleared.");
        return Ok(());
    }

    let limit = args.limit.map_or(config.max_categories, usize::from);
    let keywords = args.keywords();

    let records = match (&args.category, &keywords) {
        (Some(category), _) => {
            let corpus = catalog.all_categories().await?;
            rank(category, &corpus, limit).into_iter().cloned().collect()
        }
        (None, Some(keywords)) => {
            let mut records = catalog.categories_for_keyword(keywords).await?;
            records.truncate(limit);
            records
        }
        (None, None) => anyhow::bail!("nothing to look up: give keywords or --category"),
    };

    if records.is_empty() {
        println!("No matching categories found.");
        return Ok(());
    }

    print!("{}", output::shortlist(catalog.base_url(), &records, keywords.as_deref())?);

    Ok(())
}
