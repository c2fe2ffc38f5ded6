//! Top-headlines client for the news provider.
//!
//! Requests go to the configured top-headlines endpoint with the API key as
//! a query parameter. Successful responses are cached per
//! country/category/query for the configured TTL, in a JSON file when one
//! is configured so later runs read the same listing.

use reqwest::Client;
use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, instrument, warn};
use url::Url;

use crate::cache::TtlCache;
use crate::models::{Article, Category, NewsResponse};

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("NEWS_API_KEY is not configured")]
    MissingApiKey,

    #[error("news provider returned {status}: {message}")]
    Provider { status: u16, message: String },
}

pub struct NewsClient {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
    cache: TtlCache<Vec<Article>>,
    cache_file: Option<PathBuf>,
}

impl std::fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("cached", &self.cache.len())
            .field("cache_file", &self.cache_file)
            .finish()
    }
}

impl NewsClient {
    pub fn new(base_url: &str, api_key: Option<String>, cache_ttl: Duration) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            http: Client::builder().user_agent(concat!("news_quiz/", env!("CARGO_PKG_VERSION"))).build()?,
            base_url: Url::parse(base_url)?,
            api_key,
            cache: TtlCache::new(cache_ttl),
            cache_file: None,
        })
    }

    /// Back the cache with `path`. An unreadable file starts an empty cache
    /// that overwrites it on the next fetch.
    pub fn with_cache_file(mut self, path: PathBuf) -> Self {
        match TtlCache::load(&path, self.cache.ttl()) {
            Ok(cache) => self.cache = cache,
            Err(e) => warn!(error = %e, "Ignoring unreadable headline cache"),
        }
        self.cache_file = Some(path);
        self
    }

    /// Fetch top headlines, serving from cache when a fresh copy exists.
    #[instrument(level = "info", skip(self))]
    pub async fn top_headlines(
        &mut self,
        country: &str,
        category: Category,
        query: Option<&str>,
    ) -> Result<Vec<Article>, Box<dyn Error>> {
        let key = cache_key(country, category, query);
        if let Some(articles) = self.cache.get(&key) {
            info!(%key, cache_hit = true, count = articles.len(), "Serving headlines from cache");
            return Ok(articles);
        }

        let api_key = self.api_key.as_deref().ok_or(NewsError::MissingApiKey)?;
        let url = headlines_url(&self.base_url, country, category, query, api_key);
        let articles = self.fetch(url).await?;

        info!(%key, cache_hit = false, count = articles.len(), "Fetched headlines");
        self.cache.insert(key, articles.clone());
        if let Some(path) = &self.cache_file {
            if let Err(e) = self.cache.save(path) {
                warn!(error = %e, "Failed to write headline cache");
            }
        }
        Ok(articles)
    }

    /// One uncached request for US headlines to confirm the key works.
    #[instrument(level = "info", skip(self))]
    pub async fn check_api_key(&self) -> Result<(), Box<dyn Error>> {
        let api_key = self.api_key.as_deref().ok_or(NewsError::MissingApiKey)?;
        let url = headlines_url(&self.base_url, "us", Category::General, None, api_key);
        self.fetch(url).await.map(|_| ())
    }

    async fn fetch(&self, url: Url) -> Result<Vec<Article>, Box<dyn Error>> {
        let t0 = Instant::now();
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let dt = t0.elapsed();

        let parsed: Result<NewsResponse, _> = serde_json::from_str(&body);
        match parsed {
            Ok(news) if status.is_success() && news.is_ok() => Ok(news.articles),
            Ok(news) => {
                let message = news
                    .message
                    .or(news.code)
                    .unwrap_or_else(|| "Failed to fetch news".to_string());
                warn!(status = status.as_u16(), elapsed_ms = dt.as_millis() as u64, %message, "Provider rejected request");
                Err(NewsError::Provider {
                    status: status.as_u16(),
                    message,
                }
                .into())
            }
            Err(e) => {
                warn!(status = status.as_u16(), elapsed_ms = dt.as_millis() as u64, error = %e, "Unreadable provider response");
                Err(NewsError::Provider {
                    status: status.as_u16(),
                    message: format!("unreadable response: {e}"),
                }
                .into())
            }
        }
    }
}

pub fn cache_key(country: &str, category: Category, query: Option<&str>) -> String {
    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => format!("news_{country}_{category}_{}", q.to_lowercase()),
        None => format!("news_{country}_{category}"),
    }
}

pub fn headlines_url(base: &Url, country: &str, category: Category, query: Option<&str>, api_key: &str) -> Url {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("country", country)
            .append_pair("category", category.as_str());
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            pairs.append_pair("q", q);
        }
        pairs.append_pair("apiKey", api_key);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://newsapi.org/v2/top-headlines").unwrap()
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key("us", Category::General, None), "news_us_general");
        assert_eq!(cache_key("us", Category::Sports, Some("  ")), "news_us_sports");
        assert_eq!(
            cache_key("gb", Category::Science, Some("Mars Rover")),
            "news_gb_science_mars rover"
        );
    }

    #[test]
    fn test_headlines_url() {
        let url = headlines_url(&base(), "us", Category::Technology, None, "k3y");
        assert_eq!(
            url.as_str(),
            "https://newsapi.org/v2/top-headlines?country=us&category=technology&apiKey=k3y"
        );
    }

    #[test]
    fn test_headlines_url_encodes_query() {
        let url = headlines_url(&base(), "us", Category::General, Some("rust & c++"), "k");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("q".to_string(), "rust & c++".to_string())));
        assert!(url.as_str().contains("q=rust+%26+c%2B%2B"));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let mut client = NewsClient::new(base().as_str(), None, Duration::from_secs(300)).unwrap();
        let err = client
            .top_headlines("us", Category::General, None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "NEWS_API_KEY is not configured");
    }

    #[tokio::test]
    async fn test_cached_headlines_skip_network() {
        let mut client = NewsClient::new(base().as_str(), None, Duration::from_secs(300)).unwrap();
        client
            .cache
            .insert(cache_key("us", Category::Health, None), vec![Article::new("Cached", "Body.")]);

        let articles = client.top_headlines("us", Category::Health, None).await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Cached");
    }

    #[tokio::test]
    async fn test_cache_file_serves_later_clients() {
        let dir = std::env::temp_dir().join(format!("news_quiz_news_{}", std::process::id()));
        let path = dir.join("headlines.json");
        let mut cache = TtlCache::new(Duration::from_secs(300));
        cache.insert(
            cache_key("us", Category::Science, Some("mars")),
            vec![Article::new("Rover lands", "It landed.")],
        );
        cache.save(&path).unwrap();

        let mut client = NewsClient::new(base().as_str(), None, Duration::from_secs(300))
            .unwrap()
            .with_cache_file(path.clone());
        let articles = client.top_headlines("us", Category::Science, Some("Mars")).await;
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(articles.unwrap()[0].title, "Rover lands");
    }

    #[test]
    fn test_unreadable_cache_file_starts_empty() {
        let dir = std::env::temp_dir().join(format!("news_quiz_news_bad_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("headlines.json");
        std::fs::write(&path, "{").unwrap();

        let client = NewsClient::new(base().as_str(), None, Duration::from_secs(300))
            .unwrap()
            .with_cache_file(path);
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(client.cache.len(), 0);
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = NewsClient::new(base().as_str(), Some("secret".to_string()), Duration::from_secs(1)).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
