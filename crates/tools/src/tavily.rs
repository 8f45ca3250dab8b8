//! Tavily API client for web search
//!
//! HTTP client for the Tavily search API with JSON body requests and
//! connection pooling.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Search result returned from the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Target URL of the search result
    pub url: String,

    /// Page title
    pub title: String,

    /// Content snippet
    #[serde(default)]
    pub content: String,

    /// Result relevance score (if available)
    #[serde(default)]
    pub score: f32,
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    url: String,
    title: String,

    #[serde(default)]
    content: String,

    #[serde(default)]
    score: f32,
}

/// Tavily HTTP client with connection pooling and error handling
#[derive(Debug, Clone)]
pub struct TavilyClient {
    /// Base URL of the Tavily API (e.g. "https://api.tavily.com")
    endpoint: String,

    api_key: String,

    client: Client,

    /// Maximum results to return per query
    max_results: usize,
}

impl TavilyClient {
    /// Create a new Tavily client
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    #[instrument(skip_all, fields(endpoint = %endpoint))]
    pub fn new(
        endpoint: String,
        api_key: String,
        timeout_secs: u64,
        max_results: usize,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .context("Failed to build HTTP client")?;

        let instance = Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            client,
            max_results,
        };

        info!(
            "Initialized Tavily client: endpoint={}, timeout={}s, max_results={}",
            instance.endpoint, timeout_secs, max_results
        );

        Ok(instance)
    }

    /// Perform a web search query
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The API is unreachable
    /// - Request times out
    /// - Response parsing fails
    #[instrument(skip(self), fields(query_len = query.len(), endpoint = %self.endpoint))]
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = format!("{}/search", self.endpoint);

        let request = TavilyRequest {
            api_key: &self.api_key,
            query,
            max_results: self.max_results,
        };

        debug!("Sending Tavily request: query='{}'", query);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Tavily")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Tavily returned error status {}: {}", status, error_text);
        }

        let search_response: TavilyResponse = response
            .json()
            .await
            .context("Failed to parse Tavily JSON response")?;

        info!(
            "Tavily search completed: query='{}', found {} results",
            query,
            search_response.results.len()
        );

        let results: Vec<SearchResult> = search_response
            .results
            .into_iter()
            .take(self.max_results)
            .map(|r| SearchResult {
                url: r.url,
                title: r.title,
                content: r.content,
                score: r.score,
            })
            .collect();

        debug!("Returning {} search results", results.len());

        Ok(results)
    }
}
