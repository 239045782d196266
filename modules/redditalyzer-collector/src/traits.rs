// Trait seams for the collector's two external sources.
//
// RecordSearch wraps the Pushshift search endpoint (windowed record pages).
// ContributionSource wraps the per-identity Reddit listings.
//
// Both return RedditalyzerError so the pipeline can tell skippable
// per-identity failures from fatal ones without knowing the client.

use async_trait::async_trait;
use tracing::debug;

use pushshift_client::{After, Page, PushshiftClient, PushshiftError, SearchKind};
use reddit_client::{ListingItem, RedditClient, RedditError, TimeWindow};
use redditalyzer_common::{Contribution, RedditalyzerError, Result};

// ---------------------------------------------------------------------------
// RecordSearch
// ---------------------------------------------------------------------------

#[async_trait]
pub trait RecordSearch: Send + Sync {
    /// Fetch one page of records posted to `community` strictly after `after`.
    async fn search(&self, community: &str, after: &After, kind: SearchKind) -> Result<Page>;
}

#[async_trait]
impl RecordSearch for PushshiftClient {
    async fn search(&self, community: &str, after: &After, kind: SearchKind) -> Result<Page> {
        PushshiftClient::search(self, community, after, kind)
            .await
            .map_err(search_error)
    }
}

pub fn search_error(err: PushshiftError) -> RedditalyzerError {
    match err {
        PushshiftError::RequestFailed { status, message } => {
            RedditalyzerError::RequestFailed { status, message }
        }
        PushshiftError::MissingField(field) => RedditalyzerError::MissingField(field.to_string()),
        PushshiftError::Network(msg) => RedditalyzerError::Network(msg),
        PushshiftError::Parse(msg) => RedditalyzerError::Parse(msg),
    }
}

// ---------------------------------------------------------------------------
// ContributionSource
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ContributionSource: Send + Sync {
    /// Resolve `identity` and list its top comments followed by its top
    /// submissions within `window`.
    ///
    /// Fails with `IdentityNotFound` or `IncompleteProfile` when the identity
    /// can't be resolved; anything else is fatal to the run.
    async fn contributions(&self, identity: &str, window: TimeWindow) -> Result<Vec<Contribution>>;
}

/// [`ContributionSource`] backed by the Reddit JSON API.
pub struct RedditSource {
    client: RedditClient,
    limit: u32,
}

impl RedditSource {
    pub fn new(client: RedditClient, limit: u32) -> Self {
        Self { client, limit }
    }
}

#[async_trait]
impl ContributionSource for RedditSource {
    async fn contributions(&self, identity: &str, window: TimeWindow) -> Result<Vec<Contribution>> {
        let about = self
            .client
            .about(identity)
            .await
            .map_err(|e| content_error(identity, e))?;
        if about.link_karma.is_none() {
            return Err(RedditalyzerError::IncompleteProfile {
                identity: identity.to_string(),
                field: "link_karma".to_string(),
            });
        }

        let comments = self
            .client
            .top_comments(identity, window, self.limit)
            .await
            .map_err(|e| content_error(identity, e))?;
        let submissions = self
            .client
            .top_submissions(identity, window, self.limit)
            .await
            .map_err(|e| content_error(identity, e))?;

        Ok(comments
            .into_iter()
            .chain(submissions)
            .filter_map(|item| to_contribution(identity, item))
            .collect())
    }
}

fn to_contribution(identity: &str, item: ListingItem) -> Option<Contribution> {
    let created_at = item.created_at();
    match item.subreddit {
        Some(community) => Some(Contribution {
            community,
            created_at,
        }),
        None => {
            debug!(identity, id = ?item.id, "Listing item without subreddit, ignoring");
            None
        }
    }
}

pub fn content_error(identity: &str, err: RedditError) -> RedditalyzerError {
    match err {
        RedditError::NotFound(_) => RedditalyzerError::IdentityNotFound(identity.to_string()),
        RedditError::Api { status, message } => RedditalyzerError::RequestFailed { status, message },
        RedditError::Network(msg) => RedditalyzerError::Network(msg),
        RedditError::Parse(msg) => RedditalyzerError::Parse(msg),
    }
}
