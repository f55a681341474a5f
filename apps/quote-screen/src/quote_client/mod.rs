//! Quote client: the single point of entry for calls to the quote service.
//!
//! One `fetch` performs exactly one HTTP request. Retrying is the acquirer's job,
//! so every failure here is returned to the caller untouched.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::content::Quote;
use crate::errors::FetchError;

/// Fetches one candidate quote.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch(&self) -> Result<Quote, FetchError>;
}

/// Wire shape of a hitokoto.cn sentence. Only the fields the display uses.
#[derive(Debug, Deserialize)]
struct HitokotoResponse {
    hitokoto: Option<String>,
    from_who: Option<String>,
    from: Option<String>,
}

/// Parses a hitokoto JSON body into a `Quote`.
///
/// A missing, null or blank `hitokoto` field is a fetch failure.
pub fn parse_quote(body: &str) -> Result<Quote, FetchError> {
    let response: HitokotoResponse = serde_json::from_str(body)?;
    let text = response
        .hitokoto
        .filter(|t| !t.trim().is_empty())
        .ok_or(FetchError::MissingText)?;
    Ok(Quote::new(text, response.from_who, response.from))
}

/// HTTP client for the hitokoto sentence API.
#[derive(Clone)]
pub struct HitokotoClient {
    client: Client,
    url: String,
    categories: Vec<String>,
}

impl HitokotoClient {
    /// `timeout` bounds each request end to end.
    pub fn new(
        url: String,
        categories: Vec<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url,
            categories,
        })
    }

    fn query(&self) -> Vec<(&'static str, &str)> {
        self.categories.iter().map(|c| ("c", c.as_str())).collect()
    }
}

#[async_trait]
impl QuoteSource for HitokotoClient {
    async fn fetch(&self) -> Result<Quote, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .query(&self.query())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let quote = parse_quote(&body)?;

        debug!(
            "Fetched quote: {} chars, author={:?}, source={:?}",
            quote.text.chars().count(),
            quote.author,
            quote.source
        );

        Ok(quote)
    }
}
