// JSON persistence for identity sets and aggregates between runs.

use std::fs;
use std::path::Path;

use tracing::warn;

use redditalyzer_common::{CommunityAggregate, IdentitySet, Result};

use crate::stats::RunStats;

/// Load identities in file order.
pub fn load_identities(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Load identities if `path` exists, otherwise an empty set.
pub fn load_identity_set(path: &Path) -> Result<IdentitySet> {
    if !path.exists() {
        return Ok(IdentitySet::new());
    }
    Ok(load_identities(path)?.into_iter().collect())
}

/// Write identities as a sorted JSON array.
pub fn save_identities(path: &Path, identities: &IdentitySet) -> Result<()> {
    let mut sorted: Vec<&String> = identities.iter().collect();
    sorted.sort();
    fs::write(path, serde_json::to_string_pretty(&sorted)?)?;
    Ok(())
}

pub fn load_aggregate(path: &Path) -> Result<CommunityAggregate> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn save_aggregate(path: &Path, aggregate: &CommunityAggregate) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(aggregate)?)?;
    Ok(())
}

/// Save `aggregate` whatever the run's outcome, then pass the outcome on.
/// A run that aborts part way still leaves its earlier merges on disk.
pub fn save_after_run(
    path: &Path,
    aggregate: &CommunityAggregate,
    outcome: Result<RunStats>,
) -> Result<RunStats> {
    if let Err(ref e) = outcome {
        warn!(
            error = %e,
            communities = aggregate.len(),
            path = %path.display(),
            "Run aborted, saving partial aggregate"
        );
    }
    save_aggregate(path, aggregate)?;
    outcome
}
