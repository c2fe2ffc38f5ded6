//! Data models for headlines as delivered by the news provider.
//!
//! This module defines the wire types shared by the fetch client, the
//! summarizer and the quiz engine:
//! - [`Article`]: A single headline with its body text
//! - [`Source`]: The outlet that published an article
//! - [`NewsResponse`]: The top-headlines envelope returned by the provider
//! - [`Category`]: The fixed set of headline categories
//!
//! Field names follow the provider's camelCase JSON, mapped to snake_case
//! with `#[serde(rename_all = "camelCase")]`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The outlet that published an article.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Source {
    /// Provider-side identifier, absent for smaller outlets.
    pub id: Option<String>,
    /// Human readable outlet name.
    pub name: Option<String>,
}

/// A news item as returned by the top-headlines endpoint.
///
/// Only `title` is guaranteed to be meaningful. The body text used by the
/// quiz engine and the summarizer comes from [`Article::body`].
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: Source,
    pub author: Option<String>,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

impl Article {
    #[cfg(test)]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// The article body: `content` when it is non-empty, otherwise
    /// `description`, otherwise the empty string.
    pub fn body(&self) -> &str {
        match self.content.as_deref() {
            Some(content) if !content.is_empty() => content,
            _ => self.description.as_deref().unwrap_or(""),
        }
    }

    /// Outlet name for display.
    pub fn source_name(&self) -> &str {
        self.source
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("Unknown Source")
    }
}

/// The top-headlines response envelope.
///
/// On failure the provider answers with `status: "error"` and fills in
/// `code` and `message` instead of `articles`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub status: String,
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<Article>,
    pub code: Option<String>,
    pub message: Option<String>,
}

impl NewsResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Headline categories understood by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Business,
    Entertainment,
    #[default]
    General,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Business,
        Category::Entertainment,
        Category::General,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::General => "general",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_deserialization() {
        let json = r#"{
            "source": {"id": "the-verge", "name": "The Verge"},
            "author": "Jane Doe",
            "title": "A new gadget ships",
            "description": "It is small.",
            "url": "https://example.com/gadget",
            "urlToImage": null,
            "publishedAt": "2025-05-06T14:30:00Z",
            "content": "The gadget shipped today. It is small… [+1200 chars]"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "A new gadget ships");
        assert_eq!(article.source.name.as_deref(), Some("The Verge"));
        assert_eq!(article.published_at.as_deref(), Some("2025-05-06T14:30:00Z"));
        assert!(article.url_to_image.is_none());
    }

    #[test]
    fn test_article_missing_fields() {
        let article: Article = serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
        assert_eq!(article.title, "Only a title");
        assert_eq!(article.body(), "");
        assert_eq!(article.source_name(), "Unknown Source");
    }

    #[test]
    fn test_body_prefers_content() {
        let mut article = Article::new("t", "From content.");
        article.description = Some("From description.".to_string());
        assert_eq!(article.body(), "From content.");
    }

    #[test]
    fn test_body_falls_back_to_description() {
        let mut article = Article::new("t", "");
        article.description = Some("From description.".to_string());
        assert_eq!(article.body(), "From description.");

        article.content = None;
        assert_eq!(article.body(), "From description.");
    }

    #[test]
    fn test_news_response_error_envelope() {
        let json = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        let response: NewsResponse = serde_json::from_str(json).unwrap();
        assert!(!response.is_ok());
        assert!(response.articles.is_empty());
        assert_eq!(response.code.as_deref(), Some("apiKeyInvalid"));
    }

    #[test]
    fn test_news_response_ok_envelope() {
        let json = r#"{"status":"ok","totalResults":1,"articles":[{"title":"Hello","source":{"id":null,"name":"BBC"}}]}"#;
        let response: NewsResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_ok());
        assert_eq!(response.total_results, Some(1));
        assert_eq!(response.articles[0].source_name(), "BBC");
    }

    #[test]
    fn test_category_names() {
        let names: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        assert_eq!(
            names,
            vec!["business", "entertainment", "general", "health", "science", "sports", "technology"]
        );
        assert_eq!(Category::default(), Category::General);
        assert_eq!(serde_json::to_string(&Category::Sports).unwrap(), "\"sports\"");
    }
}
