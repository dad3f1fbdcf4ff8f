//! Scribe - A static site builder for markdown blogs.

mod build;
mod cli;
mod config;
mod content;
mod generator;
mod logger;
mod remote;
mod utils;

use anyhow::{Context, Result, bail};
use build::{build_site, check_site};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use remote::{FeedItem, fetch_changelog_html, fetch_news};
use std::{fs, path::Path};
use utils::date::format_date_short;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_site(&config).map(|_| ()),
        Commands::Check => check_site(&config).map(|_| ()),
        Commands::News { limit, json } => {
            let items = fetch_news(&config.remote.news_url, *limit)?;
            print_news(&items, *json)
        }
        Commands::Changelog { output } => {
            let html = fetch_changelog_html(&config.remote.changelog_url)?;
            match output {
                Some(path) => {
                    fs::write(path, &html)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log!("changelog"; "{}", path.display());
                }
                None => println!("{html}"),
            }
            Ok(())
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else if cli.requires_config() {
        bail!("Config file not found: {}", config_path.display());
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    if cli.requires_config() {
        config.validate()?;
    } else {
        config.validate_remote()?;
    }

    Ok(config)
}

fn print_news(items: &[FeedItem], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }

    for item in items {
        match &item.category {
            Some(category) => println!("{}  [{category}] {}", format_date_short(item.pub_date), item.title),
            None => println!("{}  {}", format_date_short(item.pub_date), item.title),
        }
        if !item.link.is_empty() {
            println!("    {}", item.link);
        }
    }
    log!("news"; "{} items", items.len());
    Ok(())
}
