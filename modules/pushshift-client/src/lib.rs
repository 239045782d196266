pub mod error;
pub mod types;

pub use error::{PushshiftError, Result};
pub use types::{After, Page, Record, SearchKind, SearchMetadata, SearchResponse, PAGE_SIZE};

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.pushshift.io";

pub struct PushshiftClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl PushshiftClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        })
    }

    /// Query one page of comments or submissions posted to `subreddit`
    /// strictly after `after`.
    pub async fn search(&self, subreddit: &str, after: &After, kind: SearchKind) -> Result<Page> {
        let url = format!("{}/reddit/search/{}/", self.base_url, kind);
        let size = PAGE_SIZE.to_string();
        let after = after.to_string();

        let mut req = self.client.get(&url).query(&[
            ("subreddit", subreddit),
            ("size", size.as_str()),
            ("after", after.as_str()),
            ("metadata", "true"),
        ]);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(PushshiftError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        let page = parsed.into_page();
        tracing::debug!(
            subreddit,
            %kind,
            after = after.as_str(),
            returned = page.records.len(),
            complete = page.complete,
            "Fetched search page"
        );

        Ok(page)
    }
}

/// Creation timestamp of the last (oldest) record in a page, used as the
/// next page's `after` cursor.
pub fn last_created(records: &[Record]) -> Result<i64> {
    records
        .last()
        .and_then(|r| r.created_utc)
        .ok_or(PushshiftError::MissingField("created_utc"))
}
