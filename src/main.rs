//! # News Quiz
//!
//! A terminal news reader that fetches top headlines from a news provider,
//! shows full articles, summarizes them through an LLM (with an extractive
//! fallback), and quizzes the reader on what they just read.
//!
//! ## Features
//!
//! - Top headlines by country, category and keyword, cached on disk for five
//!   minutes so `headlines` and a following `quiz --index N` see the same list
//! - Article detail view
//! - Summaries from a Gemini-style model with retry/backoff, or the first
//!   three sentences when no model is available
//! - Five-question multiple-choice quiz generated from the article body
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... news_quiz headlines --category science
//! news_quiz quiz --index 2 --category science
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching**: [`news::NewsClient`] pulls headlines, memoized by [`cache::TtlCache`]
//! 2. **Summarizing**: [`summarize::summarize`] over [`api::RetryAsk`]
//! 3. **Quizzing**: [`quiz::QuizEngine`] builds questions, [`quiz::QuizSession`]
//!    keeps score, [`presenter::run_quiz`] drives it from the terminal

use clap::Parser;
use std::error::Error;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cache;
mod cli;
mod config;
mod models;
mod news;
mod presenter;
mod quiz;
mod summarize;
mod utils;

use api::GeminiClient;
use cli::{ArticleSelector, Cli, Command, Listing};
use config::AppConfig;
use models::{Article, Category};
use news::NewsClient;
use quiz::{QuizEngine, QuizSession, RngSource};
use utils::upcase;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };
    if let Some(country) = args.country {
        config.country = country;
    }

    let result = run(args.command, &config).await;
    match &result {
        Ok(()) => debug!(elapsed_ms = start_time.elapsed().as_millis() as u64, "Execution complete"),
        Err(e) => error!(error = %e, "Command failed"),
    }
    result
}

async fn run(command: Command, config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Categories => {
            for category in Category::ALL {
                writeln!(out, "{:<14} {}", category.as_str(), upcase(category.as_str()))?;
            }
        }
        Command::CheckKey => match news_client(config)?.check_api_key().await {
            Ok(()) => writeln!(out, "API key is valid")?,
            Err(e) => {
                writeln!(out, "API key is invalid: {e}")?;
                return Err(e);
            }
        },
        Command::Headlines { listing, limit } => {
            let mut articles = fetch_listing(&mut news_client(config)?, config, &listing).await?;
            if let Some(limit) = limit {
                articles.truncate(limit);
            }
            presenter::render_headlines(&mut out, &articles)?;
        }
        Command::Show { article } => {
            let article = resolve_article(config, &article).await?;
            presenter::render_article(&mut out, &article)?;
        }
        Command::Summarize { article } => {
            let article = resolve_article(config, &article).await?;
            let model = GeminiClient::from_config(&config.summarizer)?;
            let summary = summarize::summarize(model.as_ref(), article.body()).await?;
            presenter::render_summary(&mut out, &summary)?;
        }
        Command::Quiz {
            article,
            seed,
            segmenter,
            json,
        } => {
            let article = resolve_article(config, &article).await?;
            let engine = QuizEngine::new(segmenter.unwrap_or(config.segmenter));
            let mut random = match seed {
                Some(seed) => RngSource::seeded(seed),
                None => RngSource::from_os(),
            };
            let mut session = QuizSession::start(&engine, &article, &mut random);
            info!(title = %article.title, questions = session.total(), "Quiz started");

            if json {
                serde_json::to_writer_pretty(&mut out, session.questions())?;
                writeln!(out)?;
            } else {
                let stdin = io::stdin();
                let mut input = stdin.lock();
                presenter::run_quiz(&mut session, &mut input, &mut out)?;
            }
        }
    }
    Ok(())
}

fn news_client(config: &AppConfig) -> Result<NewsClient, Box<dyn Error>> {
    let client = NewsClient::new(
        &config.news_api_base_url,
        config.news_api_key.clone(),
        Duration::from_secs(config.cache_ttl_secs),
    )?;
    Ok(match config.cache_path() {
        Some(path) => client.with_cache_file(path),
        None => client,
    })
}

async fn fetch_listing(
    client: &mut NewsClient,
    config: &AppConfig,
    listing: &Listing,
) -> Result<Vec<Article>, Box<dyn Error>> {
    client
        .top_headlines(&config.country, listing.category, listing.query.as_deref())
        .await
}

/// Load the selected article from a file or from the headline list.
#[instrument(level = "info", skip(config))]
async fn resolve_article(config: &AppConfig, selector: &ArticleSelector) -> Result<Article, Box<dyn Error>> {
    if let Some(path) = &selector.file {
        return load_article(path);
    }
    let index = selector.index.ok_or("either --index or --file is required")?;
    let articles = fetch_listing(&mut news_client(config)?, config, &selector.listing).await?;
    pick(articles, index)
}

fn load_article(path: &Path) -> Result<Article, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let article: Article = serde_json::from_str(&raw)?;
    info!(path = %path.display(), title = %article.title, "Loaded article from file");
    Ok(article)
}

/// Take the article at 1-based `index`.
fn pick(articles: Vec<Article>, index: usize) -> Result<Article, Box<dyn Error>> {
    let count = articles.len();
    index
        .checked_sub(1)
        .and_then(|i| articles.into_iter().nth(i))
        .ok_or_else(|| format!("no article #{index}; the listing has {count}").into())
}
