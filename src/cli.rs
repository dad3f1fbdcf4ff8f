//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scribe markdown blog builder CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: scribe.toml)
    #[arg(short = 'C', long, default_value = "scribe.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Build arguments
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// enable rss feed generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub rss: Option<bool>,

    /// enable sitemap generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Override base URL for the site.
    ///
    /// Useful for CI/CD deployments where the production URL differs from local development.
    ///
    /// Example:
    ///   scribe build --base-url "https://blog.example.com"
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate content and build rss, sitemap and post pages
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Validate content collections without writing anything
    Check,

    /// Fetch the remote news feed and print the latest items
    News {
        /// Only show the N most recent items
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print items as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch the remote changelog and render it to HTML
    Changelog {
        /// Write HTML to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Whether the command needs a config file on disk.
    ///
    /// Remote commands work with built-in defaults.
    pub const fn requires_config(&self) -> bool {
        matches!(self.command, Commands::Build { .. } | Commands::Check)
    }

    /// Build arguments, if the command carries any.
    pub const fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Commands::Build { build_args } => Some(build_args),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::try_parse_from([
            "scribe",
            "build",
            "--clean",
            "--rss=false",
            "--base-url",
            "https://blog.example.com",
        ])
        .unwrap();

        let args = cli.build_args().unwrap();
        assert!(args.clean);
        assert_eq!(args.rss, Some(false));
        assert_eq!(args.sitemap, None);
        assert_eq!(args.base_url.as_deref(), Some("https://blog.example.com"));
        assert!(cli.requires_config());
    }

    #[test]
    fn test_parse_news_limit() {
        let cli = Cli::try_parse_from(["scribe", "news", "--limit", "3", "--json"]).unwrap();
        match cli.command {
            Commands::News { limit, json } => {
                assert_eq!(limit, Some(3));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!cli.requires_config());
    }

    #[test]
    fn test_default_config_name() {
        let cli = Cli::try_parse_from(["scribe", "check"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("scribe.toml"));
        assert!(cli.root.is_none());
        assert!(cli.build_args().is_none());
    }

    #[test]
    fn test_global_root_before_subcommand() {
        let cli = Cli::try_parse_from(["scribe", "--root", "site", "changelog"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert!(matches!(cli.command, Commands::Changelog { output: None }));
    }
}
