use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Relative time filter accepted by the `top` listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    Week,
    #[default]
    Month,
    Year,
    All,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
            TimeWindow::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "year" => Ok(TimeWindow::Year),
            "all" => Ok(TimeWindow::All),
            other => Err(format!("unknown time window: {other}")),
        }
    }
}

/// Envelope used by every Reddit "thing" response.
#[derive(Debug, Clone, Deserialize)]
pub struct Thing<T> {
    pub kind: Option<String>,
    pub data: T,
}

/// Profile data from `/user/{name}/about.json`.
///
/// Suspended accounts come back with most fields stripped, so everything
/// beyond `name` is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAbout {
    pub name: Option<String>,
    pub link_karma: Option<i64>,
    pub comment_karma: Option<i64>,
    pub is_suspended: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub after: Option<String>,
    #[serde(default)]
    pub children: Vec<Thing<ListingItem>>,
}

/// A comment (`t1`) or submission (`t3`) in a user listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingItem {
    pub id: Option<String>,
    pub subreddit: Option<String>,
    pub created_utc: Option<f64>,
    pub score: Option<i64>,
}

impl ListingItem {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_utc
            .and_then(|ts| DateTime::from_timestamp(ts as i64, 0))
    }
}
