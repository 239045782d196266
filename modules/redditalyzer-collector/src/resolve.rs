// Per-identity contribution fetch shared by attribution and correction.
//
// Fetches may run ahead with bounded concurrency, but `buffered` yields
// results in input order, so callers merge into the aggregate one identity
// at a time in the order given.

use futures::stream::{self, Stream, StreamExt};

use reddit_client::TimeWindow;
use redditalyzer_common::{Contribution, Result};

use crate::traits::ContributionSource;

pub(crate) struct Resolved<'a> {
    pub index: usize,
    pub identity: &'a str,
    pub result: Result<Vec<Contribution>>,
}

pub(crate) fn resolve_in_order<'a>(
    source: &'a dyn ContributionSource,
    identities: &'a [String],
    window: TimeWindow,
    concurrency: usize,
) -> impl Stream<Item = Resolved<'a>> + 'a {
    stream::iter(identities.iter().enumerate())
        .map(move |(index, identity)| async move {
            let result = source.contributions(identity, window).await;
            Resolved {
                index,
                identity: identity.as_str(),
                result,
            }
        })
        .buffered(concurrency.max(1))
}
