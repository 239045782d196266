use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Deduplicated set of author identities.
pub type IdentitySet = HashSet<String>;

/// Stand-in identity for records whose author field is absent.
pub const UNKNOWN_AUTHOR: &str = "[unknown]";

// ---------------------------------------------------------------------------
// Contributions
// ---------------------------------------------------------------------------

/// One post or comment made by an identity, reduced to where it landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub community: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Contribution {
    pub fn new(community: impl Into<String>) -> Self {
        Self {
            community: community.into(),
            created_at: None,
        }
    }
}

/// Identity-local contribution counts per community.
///
/// Built from one identity's full contribution set before anything touches
/// the shared aggregate, so the reference-community count belongs to that
/// identity alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityTally {
    counts: BTreeMap<String, u64>,
}

impl IdentityTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contributions<'a, I>(contributions: I) -> Self
    where
        I: IntoIterator<Item = &'a Contribution>,
    {
        let mut tally = Self::new();
        for c in contributions {
            tally.record(&c.community);
        }
        tally
    }

    pub fn record(&mut self, community: &str) {
        *self.counts.entry(community.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, community: &str) -> u64 {
        self.counts.get(community).copied().unwrap_or(0)
    }

    /// Communities touched at least once.
    pub fn communities(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Community aggregate
// ---------------------------------------------------------------------------

/// Running totals for one community.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityStats {
    #[serde(default)]
    pub activity: u64,
    /// Activity credited to identities also active in the reference community.
    #[serde(default)]
    pub spillover: u64,
    #[serde(default)]
    pub users: u64,
}

/// Community name → [`CommunityStats`]. Owned by the caller and threaded by
/// `&mut` through a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommunityAggregate {
    communities: BTreeMap<String, CommunityStats>,
}

impl CommunityAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-insert-default: a community first touched starts at all zeros.
    pub fn entry(&mut self, community: &str) -> &mut CommunityStats {
        self.communities.entry(community.to_string()).or_default()
    }

    pub fn get(&self, community: &str) -> Option<&CommunityStats> {
        self.communities.get(community)
    }

    pub fn activity(&self, community: &str) -> u64 {
        self.get(community).map(|s| s.activity).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommunityStats)> {
        self.communities.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.communities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    /// Merge one identity's tally. Returns the identity's reference-community
    /// activity (the attribution delta).
    ///
    /// Every contribution adds to its community's `activity`. Each touched
    /// community other than `reference` then gains one user, plus the delta
    /// as spillover when the delta is positive.
    pub fn commit(&mut self, tally: &IdentityTally, reference: &str) -> u64 {
        let baseline = self.activity(reference);
        for community in tally.communities() {
            self.entry(community).activity += tally.count(community);
        }
        let delta = self.activity(reference) - baseline;

        for community in tally.communities().filter(|c| *c != reference) {
            let stats = self.entry(community);
            if delta > 0 {
                stats.spillover += delta;
            }
            stats.users += 1;
        }
        delta
    }

    /// Add one user to every non-reference community in `tally`, leaving
    /// `activity` and `spillover` alone. Not deduplicated across calls.
    pub fn credit_users(&mut self, tally: &IdentityTally, reference: &str) {
        for community in tally.communities().filter(|c| *c != reference) {
            // A `users` field missing from a loaded aggregate deserializes to 0.
            self.entry(community).users += 1;
        }
    }
}

impl FromIterator<(String, CommunityStats)> for CommunityAggregate {
    fn from_iter<T: IntoIterator<Item = (String, CommunityStats)>>(iter: T) -> Self {
        Self {
            communities: iter.into_iter().collect(),
        }
    }
}
