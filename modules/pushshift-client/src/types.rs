use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Page size requested from the search endpoint.
pub const PAGE_SIZE: u32 = 100;

/// Which search endpoint to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    #[default]
    Comment,
    Submission,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Comment => "comment",
            SearchKind::Submission => "submission",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SearchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comment" => Ok(SearchKind::Comment),
            "submission" => Ok(SearchKind::Submission),
            other => Err(format!("unknown search kind: {other}")),
        }
    }
}

/// Lower bound of a search window. Results are strictly newer than this.
///
/// `Relative` is passed through verbatim (e.g. `"30d"`); `Timestamp` is an
/// epoch-seconds cursor taken from a previous page via [`crate::last_created`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum After {
    Relative(String),
    Timestamp(i64),
}

impl Default for After {
    fn default() -> Self {
        After::Relative("30d".to_string())
    }
}

impl fmt::Display for After {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            After::Relative(s) => f.write_str(s),
            After::Timestamp(ts) => write!(f, "{ts}"),
        }
    }
}

impl From<&str> for After {
    fn from(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(ts) => After::Timestamp(ts),
            Err(_) => After::Relative(s.to_string()),
        }
    }
}

/// A single comment or submission returned by the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: Option<String>,
    /// `None` when the author field is absent from the payload.
    pub author: Option<String>,
    pub subreddit: Option<String>,
    #[serde(default, deserialize_with = "de_epoch_seconds")]
    pub created_utc: Option<i64>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub records: Vec<Record>,
    /// `false` when the window holds more matches than were returned.
    pub complete: bool,
}

/// Raw search response body.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<Record>,
    pub metadata: SearchMetadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchMetadata {
    pub results_returned: u64,
    pub total_results: u64,
}

impl SearchResponse {
    pub fn into_page(self) -> Page {
        let complete = self.metadata.results_returned >= self.metadata.total_results;
        Page {
            records: self.data,
            complete,
        }
    }
}

// The archive has served created_utc both as an integer and as a float.
fn de_epoch_seconds<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Number> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))))
}
