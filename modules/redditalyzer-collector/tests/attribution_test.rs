//! Attribution runs against MockContributions.
//!
//! Each test: register identity outcomes → attribute() → assert aggregate.
//! No network.

use reddit_client::TimeWindow;
use redditalyzer_collector::testing::{identities, MockContributions};
use redditalyzer_collector::{attribute, RunOptions};
use redditalyzer_common::{CommunityAggregate, CommunityStats, RedditalyzerError};

const REF: &str = "LudwigAhgren";

fn stats(activity: u64, spillover: u64, users: u64) -> CommunityStats {
    CommunityStats {
        activity,
        spillover,
        users,
    }
}

fn options() -> RunOptions {
    RunOptions::new(REF)
}

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_identity_list_leaves_aggregate_unchanged() {
    let source = MockContributions::new();
    let mut aggregate = CommunityAggregate::new();
    aggregate.entry("rust").activity = 7;
    let before = aggregate.clone();

    let run = attribute(&source, &[], &mut aggregate, &options()).await.unwrap();

    assert_eq!(aggregate, before);
    assert_eq!(run.identities_seen, 0);
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn reference_participant_credits_spillover_per_reference_contribution() {
    let source = MockContributions::new().on_identity("fan", &[REF, REF, REF, "x"]);
    let mut aggregate = CommunityAggregate::new();

    let run = attribute(&source, &identities(&["fan"]), &mut aggregate, &options())
        .await
        .unwrap();

    assert_eq!(aggregate.get("x"), Some(&stats(1, 3, 1)));
    assert_eq!(aggregate.get(REF), Some(&stats(3, 0, 0)));
    assert_eq!(run.reference_participants, 1);
    assert_eq!(run.contributions, 4);
}

#[tokio::test]
async fn non_participant_counts_activity_and_users_only() {
    let source = MockContributions::new().on_identity("outsider", &["y"]);
    let mut aggregate = CommunityAggregate::new();

    attribute(&source, &identities(&["outsider"]), &mut aggregate, &options())
        .await
        .unwrap();

    assert_eq!(aggregate.get("y"), Some(&stats(1, 0, 1)));
    assert!(aggregate.get(REF).is_none());
}

#[tokio::test]
async fn reference_only_identity_touches_no_other_community() {
    let source = MockContributions::new()
        .on_identity("loyal", &[REF, REF])
        .on_identity("other", &["z"]);
    let mut aggregate = CommunityAggregate::new();

    attribute(
        &source,
        &identities(&["loyal", "other"]),
        &mut aggregate,
        &options(),
    )
    .await
    .unwrap();

    assert_eq!(aggregate.get(REF), Some(&stats(2, 0, 0)));
    assert_eq!(aggregate.get("z"), Some(&stats(1, 0, 1)));
    assert_eq!(aggregate.len(), 2);
}

#[tokio::test]
async fn user_counted_once_per_community_per_identity() {
    let source = MockContributions::new()
        .on_identity("a", &["rust", "rust", "rust"])
        .on_identity("b", &["rust"]);
    let mut aggregate = CommunityAggregate::new();

    attribute(&source, &identities(&["a", "b"]), &mut aggregate, &options())
        .await
        .unwrap();

    assert_eq!(aggregate.get("rust"), Some(&stats(4, 0, 2)));
}

#[tokio::test]
async fn delta_is_isolated_per_identity() {
    let source = MockContributions::new()
        .on_identity("heavy", &[REF, REF, "shared"])
        .on_identity("light", &[REF, "shared", "solo"])
        .on_identity("none", &["shared"]);
    let mut aggregate = CommunityAggregate::new();

    attribute(
        &source,
        &identities(&["heavy", "light", "none"]),
        &mut aggregate,
        &options(),
    )
    .await
    .unwrap();

    assert_eq!(aggregate.get("shared"), Some(&stats(3, 3, 3)));
    assert_eq!(aggregate.get("solo"), Some(&stats(1, 1, 1)));
    assert_eq!(aggregate.get(REF), Some(&stats(3, 0, 0)));
}

#[tokio::test]
async fn resumed_aggregate_keeps_prior_counts() {
    let source = MockContributions::new().on_identity("late", &[REF, "rust"]);
    let mut aggregate: CommunityAggregate = [
        (REF.to_string(), stats(10, 0, 0)),
        ("rust".to_string(), stats(4, 2, 3)),
    ]
    .into_iter()
    .collect();

    attribute(&source, &identities(&["late"]), &mut aggregate, &options())
        .await
        .unwrap();

    assert_eq!(aggregate.get("rust"), Some(&stats(5, 3, 4)));
    assert_eq!(aggregate.get(REF), Some(&stats(11, 0, 0)));
}

// ---------------------------------------------------------------------------
// Skips and failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unresolvable_identities_are_skipped_and_reported() {
    let source = MockContributions::new()
        .not_found("gone")
        .incomplete("suspended")
        .on_identity("ok", &["rust"]);
    let mut aggregate = CommunityAggregate::new();

    let run = attribute(
        &source,
        &identities(&["gone", "suspended", "ok"]),
        &mut aggregate,
        &options(),
    )
    .await
    .unwrap();

    assert_eq!(aggregate.get("rust"), Some(&stats(1, 0, 1)));
    assert_eq!(aggregate.len(), 1);
    assert_eq!(run.identities_seen, 3);
    assert_eq!(run.identities_processed, 1);
    let skipped: Vec<&str> = run.skipped.iter().map(|s| s.identity.as_str()).collect();
    assert_eq!(skipped, vec!["gone", "suspended"]);
    assert!(run.skipped[0].reason.contains("could not be found"));
}

#[tokio::test]
async fn fatal_error_aborts_but_keeps_earlier_merges() {
    let source = MockContributions::new()
        .on_identity("first", &["rust"])
        .fatal("broken")
        .on_identity("never", &["go"]);
    let mut aggregate = CommunityAggregate::new();

    let err = attribute(
        &source,
        &identities(&["first", "broken", "never"]),
        &mut aggregate,
        &options(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RedditalyzerError::Network(_)));
    assert_eq!(aggregate.get("rust"), Some(&stats(1, 0, 1)));
    assert!(aggregate.get("go").is_none());
}

// ---------------------------------------------------------------------------
// Ordering and options
// ---------------------------------------------------------------------------

#[tokio::test]
async fn identities_resolved_in_input_order_with_window() {
    let source = MockContributions::new()
        .on_identity("b", &["x"])
        .on_identity("a", &["y"]);
    let mut aggregate = CommunityAggregate::new();

    attribute(
        &source,
        &identities(&["b", "a"]),
        &mut aggregate,
        &options().window(TimeWindow::Week),
    )
    .await
    .unwrap();

    assert_eq!(
        source.calls(),
        vec![
            ("b".to_string(), TimeWindow::Week),
            ("a".to_string(), TimeWindow::Week)
        ]
    );
}

#[tokio::test]
async fn concurrent_fetch_matches_sequential_result() {
    let build = || {
        MockContributions::new()
            .on_identity("a", &[REF, "x", "y"])
            .on_identity("b", &["x"])
            .not_found("c")
            .on_identity("d", &[REF, REF, "y"])
    };
    let names = identities(&["a", "b", "c", "d"]);

    let mut sequential = CommunityAggregate::new();
    attribute(&build(), &names, &mut sequential, &options())
        .await
        .unwrap();

    let mut concurrent = CommunityAggregate::new();
    let run = attribute(&build(), &names, &mut concurrent, &options().concurrency(4))
        .await
        .unwrap();

    assert_eq!(concurrent, sequential);
    assert_eq!(run.skipped.len(), 1);
}

#[tokio::test]
async fn repeated_identity_is_merged_once() {
    let source = MockContributions::new()
        .on_identity("a", &[REF, "x"])
        .on_identity("b", &["x"]);
    let mut aggregate = CommunityAggregate::new();

    let run = attribute(
        &source,
        &identities(&["a", "b", "a"]),
        &mut aggregate,
        &options(),
    )
    .await
    .unwrap();

    assert_eq!(aggregate.get("x"), Some(&stats(2, 1, 2)));
    assert_eq!(aggregate.get(REF), Some(&stats(1, 0, 0)));
    assert_eq!(run.duplicates, 1);
    assert_eq!(run.identities_processed, 2);
    assert_eq!(source.calls().len(), 2);
}
