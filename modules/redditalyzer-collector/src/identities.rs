use pushshift_client::Record;
use redditalyzer_common::{IdentitySet, UNKNOWN_AUTHOR};

/// Collect the distinct authors in `records`, unioned with `existing`.
///
/// Records without an author contribute [`UNKNOWN_AUTHOR`]; it is kept, not
/// filtered out.
pub fn extract_identities(records: &[Record], existing: Option<&IdentitySet>) -> IdentitySet {
    let mut identities: IdentitySet = records
        .iter()
        .map(|r| r.author.clone().unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()))
        .collect();
    if let Some(existing) = existing {
        identities.extend(existing.iter().cloned());
    }
    identities
}
