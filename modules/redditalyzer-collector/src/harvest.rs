use tracing::{debug, info, warn};

use pushshift_client::{last_created, After, SearchKind};
use redditalyzer_common::{IdentitySet, Result};

use crate::identities::extract_identities;
use crate::traits::{search_error, RecordSearch};

/// Why a harvest stopped paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HarvestStop {
    /// The endpoint reported every match in the window as returned.
    #[default]
    Complete,
    EmptyPage,
    /// The next cursor equalled the current one.
    CursorStalled,
    PageLimit,
}

#[derive(Debug, Default)]
pub struct HarvestStats {
    pub pages: u32,
    pub records: u64,
    pub identities: usize,
    pub stop: HarvestStop,
    /// Cursor to pass as `after` to resume, if paging stopped early.
    pub resume_after: Option<After>,
}

/// Page backward through `community`'s records from `start`, collecting the
/// author of every record into an identity set seeded with `existing`.
///
/// The next cursor is the last record's `created_utc`, passed as `after`.
/// Against an endpoint that sorts newest first, that cursor re-queries a
/// window the previous page already covered, and the endpoint may then
/// report it as complete. [`HarvestStop::Complete`] is only as trustworthy
/// as the endpoint's sort order.
pub async fn harvest(
    search: &dyn RecordSearch,
    community: &str,
    start: After,
    kind: SearchKind,
    max_pages: u32,
    existing: Option<&IdentitySet>,
) -> Result<(IdentitySet, HarvestStats)> {
    let mut identities = existing.cloned().unwrap_or_default();
    let mut stats = HarvestStats::default();
    let mut after = start;

    loop {
        if stats.pages >= max_pages {
            warn!(community, pages = stats.pages, after = %after, "Page limit reached");
            stats.stop = HarvestStop::PageLimit;
            stats.resume_after = Some(after);
            break;
        }

        let page = search.search(community, &after, kind).await?;
        stats.pages += 1;
        stats.records += page.records.len() as u64;
        identities = extract_identities(&page.records, Some(&identities));
        info!(
            community,
            page = stats.pages,
            returned = page.records.len(),
            identities = identities.len(),
            "Harvested page"
        );

        if page.complete {
            stats.stop = HarvestStop::Complete;
            break;
        }
        if page.records.is_empty() {
            stats.stop = HarvestStop::EmptyPage;
            break;
        }

        let next = After::Timestamp(last_created(&page.records).map_err(search_error)?);
        if next == after {
            warn!(community, cursor = %next, "Cursor did not advance, stopping");
            stats.stop = HarvestStop::CursorStalled;
            stats.resume_after = Some(next);
            break;
        }
        debug!(
            community,
            from = %after,
            to = %next,
            "Advancing cursor to last record's created_utc (results newer than it)"
        );
        after = next;
    }

    stats.identities = identities.len();
    Ok((identities, stats))
}
