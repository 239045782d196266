// Test mocks for the collector.
//
// Two mocks matching the two trait boundaries:
// - MockSearch (RecordSearch) — cursor→page map
// - MockContributions (ContributionSource) — identity→outcome map
//
// Both record the calls they receive so tests can assert ordering.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use pushshift_client::{After, Page, Record, SearchKind};
use reddit_client::TimeWindow;
use redditalyzer_common::{Contribution, RedditalyzerError, Result};

use crate::traits::{ContributionSource, RecordSearch};

// ---------------------------------------------------------------------------
// MockSearch
// ---------------------------------------------------------------------------

/// Pages keyed by the rendered `after` cursor. Unregistered cursors fail
/// with `RequestFailed` (status 404).
pub struct MockSearch {
    pages: HashMap<String, Page>,
    failures: HashMap<String, u16>,
    calls: Mutex<Vec<String>>,
}

impl MockSearch {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            failures: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on_page(mut self, after: After, page: Page) -> Self {
        self.pages.insert(after.to_string(), page);
        self
    }

    pub fn on_failure(mut self, after: After, status: u16) -> Self {
        self.failures.insert(after.to_string(), status);
        self
    }

    /// Cursors queried so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordSearch for MockSearch {
    async fn search(&self, _community: &str, after: &After, _kind: SearchKind) -> Result<Page> {
        let key = after.to_string();
        self.calls.lock().unwrap().push(key.clone());
        if let Some(&status) = self.failures.get(&key) {
            return Err(RedditalyzerError::RequestFailed {
                status,
                message: "mock failure".to_string(),
            });
        }
        self.pages
            .get(&key)
            .cloned()
            .ok_or_else(|| RedditalyzerError::RequestFailed {
                status: 404,
                message: format!("no mock page for after={key}"),
            })
    }
}

/// A record by `author` (or no author) created at `created_utc`.
pub fn record(author: Option<&str>, created_utc: Option<i64>) -> Record {
    Record {
        id: None,
        author: author.map(String::from),
        subreddit: Some("test".to_string()),
        created_utc,
    }
}

// ---------------------------------------------------------------------------
// MockContributions
// ---------------------------------------------------------------------------

enum Outcome {
    Contributions(Vec<String>),
    NotFound,
    Incomplete,
    Fatal,
}

/// Identity-keyed contribution source. Unregistered identities are not found.
pub struct MockContributions {
    outcomes: HashMap<String, Outcome>,
    calls: Mutex<Vec<(String, TimeWindow)>>,
}

impl MockContributions {
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `identity` contributed once to each listed community (repeats allowed).
    pub fn on_identity(mut self, identity: &str, communities: &[&str]) -> Self {
        self.outcomes.insert(
            identity.to_string(),
            Outcome::Contributions(communities.iter().map(|c| c.to_string()).collect()),
        );
        self
    }

    pub fn not_found(mut self, identity: &str) -> Self {
        self.outcomes.insert(identity.to_string(), Outcome::NotFound);
        self
    }

    pub fn incomplete(mut self, identity: &str) -> Self {
        self.outcomes.insert(identity.to_string(), Outcome::Incomplete);
        self
    }

    /// `identity` fails with a non-skippable network error.
    pub fn fatal(mut self, identity: &str) -> Self {
        self.outcomes.insert(identity.to_string(), Outcome::Fatal);
        self
    }

    pub fn calls(&self) -> Vec<(String, TimeWindow)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockContributions {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContributionSource for MockContributions {
    async fn contributions(&self, identity: &str, window: TimeWindow) -> Result<Vec<Contribution>> {
        self.calls.lock().unwrap().push((identity.to_string(), window));
        match self.outcomes.get(identity) {
            Some(Outcome::Contributions(communities)) => {
                Ok(communities.iter().map(Contribution::new).collect())
            }
            Some(Outcome::Incomplete) => Err(RedditalyzerError::IncompleteProfile {
                identity: identity.to_string(),
                field: "link_karma".to_string(),
            }),
            Some(Outcome::Fatal) => Err(RedditalyzerError::Network("connection reset".to_string())),
            Some(Outcome::NotFound) | None => {
                Err(RedditalyzerError::IdentityNotFound(identity.to_string()))
            }
        }
    }
}

/// Owned identity list from string literals.
pub fn identities(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
