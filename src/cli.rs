//! Command-line interface definitions for News Quiz.
//!
//! This module defines the CLI arguments and subcommands using the `clap`
//! crate. API keys are read from the environment or the config file, never
//! from flags.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::models::Category;
use crate::quiz::SegmenterKind;

/// Command-line arguments for the News Quiz application.
///
/// # Examples
///
/// ```sh
/// # List technology headlines
/// news_quiz headlines --category technology
///
/// # Take a quiz on the third headline
/// news_quiz quiz --index 3 --category technology
///
/// # Quiz on a saved article, reproducibly
/// news_quiz quiz --file article.json --seed 7
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to config.yaml file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Two-letter country code for headlines (overrides config)
    #[arg(long, global = true)]
    pub country: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the headline categories
    Categories,

    /// Check that the configured news API key is accepted
    CheckKey,

    /// List top headlines
    Headlines {
        #[command(flatten)]
        listing: Listing,

        /// Show at most this many headlines
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one article in full
    Show {
        #[command(flatten)]
        article: ArticleSelector,
    },

    /// Summarize one article
    Summarize {
        #[command(flatten)]
        article: ArticleSelector,
    },

    /// Take a five-question quiz on one article
    Quiz {
        #[command(flatten)]
        article: ArticleSelector,

        /// Seed for reproducible questions
        #[arg(long)]
        seed: Option<u64>,

        /// Sentence splitting strategy (overrides config)
        #[arg(long, value_enum)]
        segmenter: Option<SegmenterKind>,

        /// Print the generated questions as JSON instead of playing
        #[arg(long)]
        json: bool,
    },
}

/// Which headline list to read.
#[derive(Args, Debug, Clone)]
pub struct Listing {
    /// Headline category
    #[arg(long, value_enum, default_value_t = Category::General)]
    pub category: Category,

    /// Keyword filter passed to the provider
    #[arg(short, long)]
    pub query: Option<String>,
}

/// An article picked from the headline list or loaded from a JSON file.
#[derive(Args, Debug, Clone)]
pub struct ArticleSelector {
    /// 1-based position in the headline list
    #[arg(short, long, required_unless_present = "file")]
    pub index: Option<usize>,

    /// Read the article from a JSON file instead of fetching headlines
    #[arg(short, long, conflicts_with = "index")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub listing: Listing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headlines_defaults() {
        let cli = Cli::parse_from(["news_quiz", "headlines"]);
        match cli.command {
            Command::Headlines { listing, limit } => {
                assert_eq!(listing.category, Category::General);
                assert!(listing.query.is_none());
                assert!(limit.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_quiz_from_index() {
        let cli = Cli::parse_from([
            "news_quiz",
            "quiz",
            "--index",
            "3",
            "--category",
            "science",
            "--seed",
            "7",
            "--segmenter",
            "trimmed",
        ]);
        match cli.command {
            Command::Quiz {
                article,
                seed,
                segmenter,
                json,
            } => {
                assert_eq!(article.index, Some(3));
                assert_eq!(article.listing.category, Category::Science);
                assert_eq!(seed, Some(7));
                assert_eq!(segmenter, Some(SegmenterKind::Trimmed));
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["news_quiz", "show", "-f", "a.json", "--country", "gb", "-c", "conf.yaml"]);
        assert_eq!(cli.country.as_deref(), Some("gb"));
        assert_eq!(cli.config.as_deref(), Some("conf.yaml"));
        match cli.command {
            Command::Show { article } => assert_eq!(article.file, Some(PathBuf::from("a.json"))),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_article_selector_requires_source() {
        assert!(Cli::try_parse_from(["news_quiz", "summarize"]).is_err());
        assert!(Cli::try_parse_from(["news_quiz", "quiz", "-i", "1", "-f", "a.json"]).is_err());
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(Cli::try_parse_from(["news_quiz", "headlines", "--category", "weather"]).is_err());
    }
}
