pub mod error;
pub mod types;

pub use error::{RedditError, Result};
pub use types::{Listing, ListingItem, Thing, TimeWindow, UserAbout};

use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

pub struct RedditClient {
    client: reqwest::Client,
    base_url: String,
}

impl RedditClient {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Profile probe. Fails with `NotFound` for deleted or nonexistent accounts.
    pub async fn about(&self, username: &str) -> Result<UserAbout> {
        let url = format!("{}/user/{}/about.json", self.base_url, username);
        let thing: Thing<UserAbout> = self.get_json(&url, username, &[]).await?;
        Ok(thing.data)
    }

    /// Top comments by `username` within `window`.
    pub async fn top_comments(
        &self,
        username: &str,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<ListingItem>> {
        self.top_listing(username, "comments", window, limit).await
    }

    /// Top submissions by `username` within `window`.
    pub async fn top_submissions(
        &self,
        username: &str,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<ListingItem>> {
        self.top_listing(username, "submitted", window, limit).await
    }

    async fn top_listing(
        &self,
        username: &str,
        section: &str,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<ListingItem>> {
        let url = format!("{}/user/{}/{}.json", self.base_url, username, section);
        let limit = limit.to_string();
        let listing: Thing<Listing> = self
            .get_json(
                &url,
                username,
                &[("sort", "top"), ("t", window.as_str()), ("limit", limit.as_str())],
            )
            .await?;

        let items: Vec<ListingItem> = listing.data.children.into_iter().map(|c| c.data).collect();
        tracing::debug!(username, section, %window, count = items.len(), "Fetched user listing");
        Ok(items)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        username: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let resp = self.client.get(url).query(query).send().await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RedditError::NotFound(username.to_string()));
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(RedditError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
