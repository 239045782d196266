use std::pin::pin;

use futures::StreamExt;
use tracing::{info, warn};

use redditalyzer_common::{CommunityAggregate, IdentityTally, Result};

use crate::attribution::RunOptions;
use crate::resolve::resolve_in_order;
use crate::stats::RunStats;
use crate::traits::ContributionSource;

/// Recount `users` on an existing aggregate without touching `activity` or
/// `spillover`.
///
/// Every non-reference community an identity touched gains one user. There
/// is no record of which identities were already counted, so running this
/// twice over the same identities counts them twice.
pub async fn correct_users(
    source: &dyn ContributionSource,
    identities: &[String],
    aggregate: &mut CommunityAggregate,
    options: &RunOptions,
) -> Result<RunStats> {
    let mut stats = RunStats::default();
    let mut resolved = pin!(resolve_in_order(
        source,
        identities,
        options.window,
        options.concurrency,
    ));

    while let Some(r) = resolved.next().await {
        stats.identities_seen += 1;
        info!(index = r.index, identity = r.identity, "Correcting users for identity");

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
        aggregate.credit_users(&tally, &options.reference_community);
        stats.identities_processed += 1;
        stats.contributions += tally.total();
    }

    info!(
        processed = stats.identities_processed,
        skipped = stats.skipped.len(),
        "User correction finished"
    );
    Ok(stats)
}
