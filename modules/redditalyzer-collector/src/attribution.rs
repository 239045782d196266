use std::collections::HashSet;
use std::pin::pin;

use futures::StreamExt;
use tracing::{debug, info, warn};

use reddit_client::TimeWindow;
use redditalyzer_common::{CommunityAggregate, IdentityTally, Result};

use crate::resolve::resolve_in_order;
use crate::stats::RunStats;
use crate::traits::ContributionSource;

/// Parameters shared by attribution and correction runs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub window: TimeWindow,
    pub reference_community: String,
    /// Contribution listings fetched ahead of the merge point.
    pub concurrency: usize,
}

impl RunOptions {
    pub fn new(reference_community: impl Into<String>) -> Self {
        Self {
            window: TimeWindow::Month,
            reference_community: reference_community.into(),
            concurrency: 1,
        }
    }

    pub fn window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Count each identity's contributions per community and credit spillover
/// from the reference community, mutating `aggregate` in place.
///
/// Identities are merged strictly in input order, each at most once per
/// call; repeats in `identities` are dropped before fetching. An identity that can't be
/// resolved is logged, recorded in the returned stats, and skipped without
/// touching the aggregate. Any other source failure aborts the run; whatever
/// was merged before it stays merged.
pub async fn attribute(
    source: &dyn ContributionSource,
    identities: &[String],
    aggregate: &mut CommunityAggregate,
    options: &RunOptions,
) -> Result<RunStats> {
    let reference = options.reference_community.as_str();
    let mut stats = RunStats::default();

    let mut seen = HashSet::new();
    let unique: Vec<String> = identities
        .iter()
        .filter(|&identity| {
            if seen.insert(identity.as_str()) {
                return true;
            }
            warn!(identity = identity.as_str(), "Duplicate identity in input, counting once");
            stats.duplicates += 1;
            false
        })
        .cloned()
        .collect();

    let mut resolved = pin!(resolve_in_order(
        source,
        &unique,
        options.window,
        options.concurrency,
    ));

    while let Some(r) = resolved.next().await {
        stats.identities_seen += 1;
        info!(index = r.index, identity = r.identity, "Processing identity");

        let contributions = match r.result {
            Ok(contributions) => contributions,
            Err(e) if e.is_skippable() => {
                warn!(identity = r.identity, error = %e, "Identity could not be resolved, skipping");
                stats.skip(r.identity, e.to_string());
                continue;
            }
            Err(e) => return Err(e),
        };

        let tally = IdentityTally::from_contributions(&contributions);
        let delta = aggregate.commit(&tally, reference);

        stats.identities_processed += 1;
        stats.contributions += tally.total();
        if delta > 0 {
            stats.reference_participants += 1;
        }
        debug!(
            identity = r.identity,
            contributions = tally.total(),
            reference_activity = delta,
            "Merged identity"
        );
    }

    info!(
        processed = stats.identities_processed,
        skipped = stats.skipped.len(),
        communities = aggregate.len(),
        "Attribution run finished"
    );
    Ok(stats)
}
